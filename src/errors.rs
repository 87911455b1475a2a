// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::provider::ProviderError;

#[derive(Error, Debug)]
pub enum JsonsmithError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Generation failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Sandbox execution failed: {0}")]
    Sandbox(String),

    #[error("Missing API key for {name}: set the {env} environment variable")]
    MissingKey { name: String, env: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, JsonsmithError>;
