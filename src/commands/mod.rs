// src/commands/mod.rs

//! The `jq` and `py` subcommands.
//!
//! Both follow the same sequence: sample the input, generate a program, then
//! either print it (output-only mode) or execute it and relay the result.
//! Only the system instruction and the executor differ.

use std::future::Future;
use std::io::ErrorKind;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::cli::GenerateArgs;
use crate::errors::Result;
use crate::exec::{FilterEngine, RunOutcome, SandboxClient, run_filter, run_script};
use crate::generate::Generator;
use crate::prompts::{JQ_SYSTEM_PROMPT, PY_SYSTEM_PROMPT, build_prompt};
use crate::provider::LlmProvider;
use crate::sample::read_sample;
use crate::style::{Styler, Tone};

/// The invocation's standard streams.
///
/// `input` is `None` when stdin is a terminal: there is no data to sample
/// and nothing to run the program against.
pub struct Streams<'a, I: ?Sized, O: ?Sized, E: ?Sized> {
    pub input: Option<&'a mut I>,
    pub stdout: &'a mut O,
    pub stderr: &'a mut E,
}

/// Everything needed to reach the model.
#[derive(Clone, Copy)]
pub struct Session<'a> {
    pub provider: &'a dyn LlmProvider,
    pub temperature: Option<f32>,
    pub styler: Styler,
}

impl<'a> Session<'a> {
    pub fn new(provider: &'a dyn LlmProvider) -> Self {
        Self {
            provider,
            temperature: None,
            styler: Styler::plain(),
        }
    }
}

/// Generate a jq program and run it over the input.
pub async fn jq<I, O, E, F>(
    session: Session<'_>,
    opts: &GenerateArgs,
    engine: &FilterEngine,
    streams: Streams<'_, I, O, E>,
    interrupt: F,
) -> Result<RunOutcome>
where
    I: AsyncRead + Unpin + ?Sized,
    O: AsyncWrite + Unpin + ?Sized,
    E: AsyncWrite + Unpin + ?Sized,
    F: Future<Output = ()>,
{
    let Streams {
        mut input,
        stdout,
        stderr,
    } = streams;

    let (sample, program) =
        sample_and_generate(session, opts, JQ_SYSTEM_PROMPT, input.as_deref_mut(), stderr).await?;

    let Some(input) = input.filter(|_| !opts.output) else {
        return print_program(&program, stdout).await;
    };

    let outcome = run_filter(engine, &program, &sample, Some(input), stdout, stderr, interrupt).await?;

    if matches!(outcome, RunOutcome::Exited(_)) && !opts.silent && !opts.verbose {
        let trailer = session.styler.paint(Tone::Program, &program);
        stderr.write_all(trailer.as_bytes()).await?;
        stderr.write_all(b"\n").await?;
        stderr.flush().await?;
    }

    info!(exit_code = outcome.exit_code(), "jq command finished");
    Ok(outcome)
}

/// Generate a Python script and run it in the remote sandbox.
pub async fn py<I, O, E>(
    session: Session<'_>,
    opts: &GenerateArgs,
    sandbox: &dyn SandboxClient,
    language: &str,
    streams: Streams<'_, I, O, E>,
) -> Result<RunOutcome>
where
    I: AsyncRead + Unpin + ?Sized,
    O: AsyncWrite + Unpin + ?Sized,
    E: AsyncWrite + Unpin + ?Sized,
{
    let Streams {
        mut input,
        stdout,
        stderr,
    } = streams;

    let (sample, program) =
        sample_and_generate(session, opts, PY_SYSTEM_PROMPT, input.as_deref_mut(), stderr).await?;

    let Some(input) = input.filter(|_| !opts.output) else {
        return print_program(&program, stdout).await;
    };

    let outcome = run_script(sandbox, language, &program, &sample, Some(input), stdout, stderr).await?;

    info!(exit_code = outcome.exit_code(), "py command finished");
    Ok(outcome)
}

async fn sample_and_generate<I, E>(
    session: Session<'_>,
    opts: &GenerateArgs,
    system: &str,
    input: Option<&mut I>,
    stderr: &mut E,
) -> Result<(Vec<u8>, String)>
where
    I: AsyncRead + Unpin + ?Sized,
    E: AsyncWrite + Unpin + ?Sized,
{
    let sample = match input {
        Some(input) => read_sample(input, opts.length).await?,
        None => Vec::new(),
    };
    let prompt = build_prompt(&opts.description, &sample);

    let program = Generator::new(session.provider)
        .with_temperature(session.temperature)
        .with_styler(session.styler)
        .verbose(opts.verbose)
        .generate(system, &prompt, stderr)
        .await?;

    Ok((sample, program))
}

/// Output-only mode: the program plus one newline on stdout.
async fn print_program<O>(program: &str, stdout: &mut O) -> Result<RunOutcome>
where
    O: AsyncWrite + Unpin + ?Sized,
{
    let written = async {
        stdout.write_all(program.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await
    }
    .await;

    match written {
        Ok(()) => Ok(RunOutcome::Exited(0)),
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(RunOutcome::BrokenPipe),
        Err(e) => Err(e.into()),
    }
}
