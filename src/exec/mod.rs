// src/exec/mod.rs

//! Execution layer for generated programs.
//!
//! - [`filter`] runs a jq-style filter engine as a local subprocess, streaming
//!   the input through its pipes.
//! - [`sandbox`] submits a script and the buffered input to a remote
//!   sandboxed interpreter and relays the captured result.
//!
//! Both report a [`RunOutcome`], which the binary turns into its exit code.

pub mod filter;
pub mod sandbox;

pub use filter::{FilterEngine, run_filter};
pub use sandbox::{ExecRequest, ExecResponse, RizaSandbox, SandboxClient, run_script};

/// Size of each read/write when relaying streams.
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Exit code used when the invocation is interrupted (Ctrl-C).
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Exit code used when whoever reads our stdout goes away.
pub const BROKEN_PIPE_EXIT_CODE: i32 = 1;

/// How a program run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The executor finished and reported this exit status.
    Exited(i32),
    /// Our own stdout was closed by the consumer.
    BrokenPipe,
    /// The user interrupted the run.
    Interrupted,
}

impl RunOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            RunOutcome::Exited(code) => code,
            RunOutcome::BrokenPipe => BROKEN_PIPE_EXIT_CODE,
            RunOutcome::Interrupted => INTERRUPTED_EXIT_CODE,
        }
    }
}

/// Resolves when the user presses Ctrl-C.
///
/// If the signal handler cannot be installed this never resolves, so the run
/// simply continues uninterruptible instead of aborting.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
