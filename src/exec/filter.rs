// src/exec/filter.rs

//! Subprocess executor for filter-language programs (jq).
//!
//! The child gets three pipes. Three futures service them at the same time:
//!
//! - the feeder writes the sample, then the rest of our input, then closes
//!   the child's stdin;
//! - the stdout pump relays output chunk by chunk, flushing each one;
//! - the stderr collector holds diagnostics back until stdout is exhausted,
//!   up to [`STDERR_HOLD_LIMIT`] bytes. Past that it forwards what it holds
//!   and streams the rest straight through, so memory stays bounded.
//!
//! Running them concurrently means a child that produces output before it
//! has consumed all of its input can never deadlock on full pipe buffers.

use std::future::Future;
use std::io::ErrorKind;
use std::process::{ExitStatus, Stdio};

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::{ChildStdin, ChildStdout, Command};
use tracing::{debug, info, warn};

use super::{CHUNK_SIZE, RunOutcome};
use crate::errors::Result;

/// Most child diagnostics held back while stdout is still flowing.
pub const STDERR_HOLD_LIMIT: usize = 1024 * 1024;

/// The executable that evaluates generated filter programs.
///
/// The generated program is always passed as the final argument, after any
/// configured leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEngine {
    pub binary: String,
    pub args: Vec<String>,
}

impl FilterEngine {
    pub fn new(binary: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            binary: binary.into(),
            args,
        }
    }

    /// Plain `jq` from `PATH`.
    pub fn jq() -> Self {
        Self::new("jq", Vec::new())
    }

    fn command(&self, program: &str) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.args)
            .arg(program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::jq()
    }
}

/// Why relaying stopped before the child closed its pipes.
#[derive(Debug)]
enum RelayError {
    /// Our stdout consumer went away.
    Downstream,
    Io(std::io::Error),
}

impl From<std::io::Error> for RelayError {
    fn from(e: std::io::Error) -> Self {
        RelayError::Io(e)
    }
}

/// Run `program` through the filter engine.
///
/// `sample` is written to the child first, followed by everything left in
/// `input` (if any). The child's stdout and stderr go to `stdout` and
/// `stderr`. When `interrupt` resolves the child is killed and reaped and
/// the run ends as [`RunOutcome::Interrupted`].
pub async fn run_filter<I, O, E, F>(
    engine: &FilterEngine,
    program: &str,
    sample: &[u8],
    input: Option<&mut I>,
    stdout: &mut O,
    stderr: &mut E,
    interrupt: F,
) -> Result<RunOutcome>
where
    I: AsyncRead + Unpin + ?Sized,
    O: AsyncWrite + Unpin + ?Sized,
    E: AsyncWrite + Unpin + ?Sized,
    F: Future<Output = ()>,
{
    info!(engine = %engine.binary, program, "starting filter engine");

    let mut child = engine
        .command(program)
        .spawn()
        .with_context(|| format!("spawning filter engine '{}'", engine.binary))?;

    let child_stdin = child.stdin.take();
    let child_stdout = child.stdout.take().context("filter engine stdout not captured")?;
    let child_stderr = child.stderr.take().context("filter engine stderr not captured")?;

    tokio::pin!(interrupt);

    // Owns every pipe handle; dropping it (finished or not) closes them.
    let relay = async {
        let ((), (), diagnostics) = tokio::try_join!(
            feed_stdin(child_stdin, sample, input),
            pump_stdout(child_stdout, stdout),
            collect_stderr(child_stderr, &mut *stderr),
        )?;

        if !diagnostics.is_empty() {
            stderr.write_all(&diagnostics).await?;
            stderr.flush().await?;
        }
        Ok::<(), RelayError>(())
    };

    let relayed = tokio::select! {
        res = relay => Some(res),
        () = &mut interrupt => None,
    };

    match relayed {
        None => {
            info!("interrupted; terminating filter engine");
            terminate(&mut child).await;
            Ok(RunOutcome::Interrupted)
        }
        Some(Err(RelayError::Downstream)) => {
            debug!("stdout closed by consumer; discarding remaining output");
            terminate(&mut child).await;
            Ok(RunOutcome::BrokenPipe)
        }
        Some(Err(RelayError::Io(e))) => {
            terminate(&mut child).await;
            Err(anyhow::Error::new(e).context("relaying filter engine streams").into())
        }
        Some(Ok(())) => {
            // Closed pipes do not mean the child is done.
            let status = tokio::select! {
                status = child.wait() => status.context("waiting for filter engine to exit")?,
                () = &mut interrupt => {
                    info!("interrupted after output ended; terminating filter engine");
                    terminate(&mut child).await;
                    return Ok(RunOutcome::Interrupted);
                }
            };
            let code = exit_code(status);
            info!(exit_code = code, success = status.success(), "filter engine exited");
            Ok(RunOutcome::Exited(code))
        }
    }
}

/// Kill the child and reap it so no zombie or orphan is left behind.
async fn terminate(child: &mut tokio::process::Child) {
    if let Err(e) = child.start_kill() {
        debug!(error = %e, "filter engine already gone");
    }
    if let Err(e) = child.wait().await {
        warn!(error = %e, "failed to reap filter engine");
    }
}

async fn feed_stdin<I>(
    stdin: Option<ChildStdin>,
    sample: &[u8],
    input: Option<&mut I>,
) -> std::result::Result<(), RelayError>
where
    I: AsyncRead + Unpin + ?Sized,
{
    let Some(mut stdin) = stdin else {
        return Ok(());
    };

    let fed = async {
        if !sample.is_empty() {
            stdin.write_all(sample).await?;
        }
        if let Some(input) = input {
            let mut buf = vec![0u8; CHUNK_SIZE];
            loop {
                let n = input.read(&mut buf).await?;
                if n == 0 {
                    break;
                }
                stdin.write_all(&buf[..n]).await?;
            }
        }
        stdin.shutdown().await
    }
    .await;

    // Closing stdin is the end-of-input signal for the child.
    drop(stdin);

    match fed {
        Ok(()) => Ok(()),
        // The child stopped reading (e.g. a syntax error made it exit early);
        // its exit status tells the story.
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            debug!("filter engine closed its stdin early");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn pump_stdout<O>(mut from: ChildStdout, to: &mut O) -> std::result::Result<(), RelayError>
where
    O: AsyncWrite + Unpin + ?Sized,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = from.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        let written = async {
            to.write_all(&buf[..n]).await?;
            to.flush().await
        }
        .await;
        match written {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::BrokenPipe => return Err(RelayError::Downstream),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Read the child's stderr to the end, returning whatever is still held.
///
/// Diagnostics stay in memory until they would exceed [`STDERR_HOLD_LIMIT`];
/// from then on every chunk goes to `to` as soon as it is read.
async fn collect_stderr<R, E>(mut from: R, to: &mut E) -> std::result::Result<Vec<u8>, RelayError>
where
    R: AsyncRead + Unpin,
    E: AsyncWrite + Unpin + ?Sized,
{
    let mut held = Vec::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut spilling = false;
    loop {
        let n = from.read(&mut buf).await?;
        if n == 0 {
            return Ok(held);
        }
        if !spilling && held.len() + n <= STDERR_HOLD_LIMIT {
            held.extend_from_slice(&buf[..n]);
            continue;
        }
        if !spilling {
            debug!(held = held.len(), "filter engine stderr over hold limit; streaming it");
            spilling = true;
            to.write_all(&held).await?;
            held = Vec::new();
        }
        to.write_all(&buf[..n]).await?;
        to.flush().await?;
    }
}

/// Exit status as a shell would report it: the code, or `128 + signal`.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_is_the_last_argument() {
        let engine = FilterEngine::new("jq", vec!["--compact-output".to_string()]);
        let cmd = engine.command(".a");
        let std_cmd = cmd.as_std();
        let args: Vec<_> = std_cmd.get_args().collect();
        assert_eq!(std_cmd.get_program(), "jq");
        assert_eq!(args, ["--compact-output", ".a"]);
    }

    #[test]
    fn default_engine_is_jq() {
        assert_eq!(FilterEngine::default(), FilterEngine::jq());
    }

    #[tokio::test]
    async fn small_stderr_is_held_back() {
        let mut from: &[u8] = b"jq: error: syntax\n";
        let mut to = Vec::new();

        let held = collect_stderr(&mut from, &mut to).await.unwrap();

        assert_eq!(held, b"jq: error: syntax\n");
        assert!(to.is_empty());
    }

    #[tokio::test]
    async fn stderr_past_the_hold_limit_is_streamed() {
        let noise: Vec<u8> = (0..STDERR_HOLD_LIMIT + 3 * CHUNK_SIZE + 7)
            .map(|i| b'a' + (i % 26) as u8)
            .collect();
        let mut from = noise.as_slice();
        let mut to = Vec::new();

        let held = collect_stderr(&mut from, &mut to).await.unwrap();

        assert!(held.is_empty());
        assert!(to == noise);
    }

    #[cfg(unix)]
    #[test]
    fn signalled_exit_maps_to_shell_convention() {
        use std::os::unix::process::ExitStatusExt;
        // Raw wait status for "killed by SIGKILL".
        assert_eq!(exit_code(ExitStatus::from_raw(9)), 137);
        // Raw wait status for "exited with 3".
        assert_eq!(exit_code(ExitStatus::from_raw(3 << 8)), 3);
    }
}
