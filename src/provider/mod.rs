// src/provider/mod.rs

//! Text-generation backend abstraction.
//!
//! The commands only need one thing from a model: a completion for a
//! `(system, prompt)` pair. [`LlmProvider`] captures that so tests can swap
//! the HTTP client for a scripted fake.

mod openai;

pub use openai::OpenAiProvider;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to a text-generation backend.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Provider returned error: {0}")]
    ProviderError(String),

    #[error("Provider returned no completion")]
    EmptyResponse,
}

/// Request to send to a model.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    /// System instruction.
    pub system: String,

    /// User prompt.
    pub prompt: String,

    /// Sampling temperature; the backend default when unset.
    pub temperature: Option<f32>,
}

impl LlmRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temp: Option<f32>) -> Self {
        self.temperature = temp;
        self
    }
}

/// Response from a model.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// The generated text.
    pub content: String,

    /// Wall-clock time of the round trip (ms).
    pub duration_ms: Option<u64>,
}

impl LlmResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            duration_ms: None,
        }
    }
}

/// A backend reachable by model identifier.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Send one completion request.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, ProviderError>;
}
