// src/generate.rs

//! One round trip to the model: instruction + prompt in, program out.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::errors::Result;
use crate::provider::{LlmProvider, LlmRequest};
use crate::style::{Styler, Tone};

/// Turns a prompt into a program using a single completion request.
pub struct Generator<'a> {
    provider: &'a dyn LlmProvider,
    temperature: Option<f32>,
    verbose: bool,
    styler: Styler,
}

impl<'a> Generator<'a> {
    pub fn new(provider: &'a dyn LlmProvider) -> Self {
        Self {
            provider,
            temperature: None,
            verbose: false,
            styler: Styler::plain(),
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Trace system instruction, prompt and response to `diag`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_styler(mut self, styler: Styler) -> Self {
        self.styler = styler;
        self
    }

    /// Ask the model for a program.
    ///
    /// Exactly one request is made. The completion is trimmed and otherwise
    /// returned untouched; a backend failure ends the invocation.
    pub async fn generate<E>(&self, system: &str, prompt: &str, diag: &mut E) -> Result<String>
    where
        E: AsyncWrite + Unpin + ?Sized,
    {
        if self.verbose {
            self.trace(diag, Tone::System, "System", system).await?;
            self.trace(diag, Tone::Prompt, "Prompt", prompt).await?;
        }

        info!(
            provider = self.provider.name(),
            model = self.provider.model(),
            prompt_len = prompt.len(),
            "requesting program"
        );

        let request = LlmRequest::new(system, prompt).with_temperature(self.temperature);
        let response = self.provider.complete(&request).await?;
        let program = response.content.trim().to_string();

        debug!(
            program_len = program.len(),
            duration_ms = response.duration_ms,
            "program generated"
        );

        if self.verbose {
            self.trace(diag, Tone::Prompt, "Response", &program).await?;
        }

        Ok(program)
    }

    async fn trace<E>(&self, diag: &mut E, tone: Tone, label: &str, body: &str) -> Result<()>
    where
        E: AsyncWrite + Unpin + ?Sized,
    {
        let line = self.styler.paint(tone, &format!("{label}:\n{body}"));
        diag.write_all(line.as_bytes()).await?;
        diag.write_all(b"\n").await?;
        diag.flush().await?;
        Ok(())
    }
}
