// src/lib.rs

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod exec;
pub mod generate;
pub mod logging;
pub mod prompts;
pub mod provider;
pub mod sample;
pub mod style;

use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::cli::{CliArgs, Command, GenerateArgs};
use crate::commands::{Session, Streams};
use crate::config::{ConfigFile, load_effective};
use crate::exec::{FilterEngine, RizaSandbox, RunOutcome};
use crate::provider::OpenAiProvider;
use crate::sample::stdin_is_piped;
use crate::style::Styler;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and model selection
/// - the process's standard streams
/// - the subcommand's executor (local jq or remote sandbox)
/// - Ctrl-C handling for the jq subprocess
pub async fn run(args: CliArgs) -> Result<RunOutcome> {
    let cfg = load_effective(args.config.as_deref())?;
    let styler = Styler::for_stderr();

    let piped = stdin_is_piped();
    debug!(piped, "inspected stdin");

    let mut stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut stderr = tokio::io::stderr();
    let streams = Streams {
        input: piped.then_some(&mut stdin),
        stdout: &mut stdout,
        stderr: &mut stderr,
    };

    let outcome = match &args.command {
        Command::Jq(opts) => {
            let provider = build_provider(&cfg, opts)?;
            let session = session(&cfg, &provider, styler);
            let engine = FilterEngine::new(cfg.jq.binary.clone(), cfg.jq.args.clone());

            commands::jq(session, opts, &engine, streams, exec::ctrl_c()).await?
        }
        Command::Py(opts) => {
            let provider = build_provider(&cfg, opts)?;
            let session = session(&cfg, &provider, styler);
            let sandbox = RizaSandbox::new(
                cfg.sandbox.base_url.clone(),
                lookup_key(&cfg.sandbox.api_key_env),
                cfg.sandbox.api_key_env.clone(),
                Duration::from_secs(cfg.sandbox.timeout_secs),
            )?;

            commands::py(session, opts, &sandbox, &cfg.sandbox.language, streams).await?
        }
    };

    Ok(outcome)
}

fn build_provider(cfg: &ConfigFile, opts: &GenerateArgs) -> Result<OpenAiProvider> {
    let model = cfg.resolve_model(opts.model.as_deref());
    debug!(model, base_url = %cfg.llm.base_url, "selected model");

    let provider = OpenAiProvider::new(
        cfg.llm.base_url.clone(),
        lookup_key(&cfg.llm.api_key_env),
        model,
        Duration::from_secs(cfg.llm.timeout_secs),
    )?;
    Ok(provider)
}

fn session<'a>(cfg: &ConfigFile, provider: &'a OpenAiProvider, styler: Styler) -> Session<'a> {
    Session {
        provider,
        temperature: cfg.llm.temperature,
        styler,
    }
}

/// Read an API key from the named environment variable, ignoring blanks.
fn lookup_key(env: &str) -> Option<String> {
    std::env::var(env).ok().filter(|k| !k.trim().is_empty())
}
