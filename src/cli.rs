// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::sample::DEFAULT_SAMPLE_LEN;

/// Command-line arguments for `jsonsmith`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jsonsmith",
    version,
    about = "Describe a JSON transformation in plain language and run it.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// If omitted, `JSONSMITH_CONFIG` or `~/.config/jsonsmith/config.toml`
    /// is used when present, otherwise built-in defaults.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `JSONSMITH_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Describe a jq program to run.
    Jq(GenerateArgs),

    /// Pipe JSON data in and describe a Python script to run against it.
    ///
    /// Example usage:
    ///
    ///   cat data.json | jsonsmith py "Just the first and last names"
    Py(GenerateArgs),
}

/// Options shared by both subcommands.
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// What the program should do with the input.
    pub description: String,

    /// Model id or configured alias to use.
    #[arg(short = 'm', long = "model", value_name = "MODEL")]
    pub model: Option<String>,

    /// Example length to use, in bytes.
    #[arg(short = 'l', long = "length", default_value_t = DEFAULT_SAMPLE_LEN)]
    pub length: usize,

    /// Just show the generated program.
    #[arg(short = 'o', long = "output")]
    pub output: bool,

    /// Don't echo the generated program after running it.
    #[arg(short = 's', long = "silent")]
    pub silent: bool,

    /// Verbose output of prompt and response.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
