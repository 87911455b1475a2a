// src/style.rs

//! Terminal styling for the diagnostic stream.

use std::io::IsTerminal;

use colored::Colorize;

/// What a piece of diagnostic text is, which decides its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    System,
    Prompt,
    Program,
}

/// Applies colours only when enabled, so captured stderr stays plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Styler {
    enabled: bool,
}

impl Styler {
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    /// Enable colours iff stderr is attached to a terminal.
    ///
    /// `colored` looks at stdout by default; stdout is usually a pipe here,
    /// so the decision is made explicitly for stderr.
    pub fn for_stderr() -> Self {
        let enabled = std::io::stderr().is_terminal();
        colored::control::set_override(enabled);
        Self { enabled }
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match tone {
            Tone::System => text.yellow().bold().to_string(),
            Tone::Prompt => text.green().bold().to_string(),
            Tone::Program => text.blue().bold().to_string(),
        }
    }
}
