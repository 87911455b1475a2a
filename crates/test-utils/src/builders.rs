#![allow(dead_code)]

use jsonsmith::cli::GenerateArgs;
use jsonsmith::config::{ConfigFile, RawConfigFile};
use jsonsmith::exec::FilterEngine;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_default_model(mut self, model: &str) -> Self {
        self.config.llm.default_model = model.to_string();
        self
    }

    pub fn with_alias(mut self, alias: &str, model: &str) -> Self {
        self.config.llm.aliases.insert(alias.to_string(), model.to_string());
        self
    }

    pub fn with_jq_binary(mut self, binary: &str, args: &[&str]) -> Self {
        self.config.jq.binary = binary.to_string();
        self.config.jq.args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the shared subcommand options.
pub struct GenerateArgsBuilder {
    args: GenerateArgs,
}

impl GenerateArgsBuilder {
    pub fn new(description: &str) -> Self {
        Self {
            args: GenerateArgs {
                description: description.to_string(),
                model: None,
                length: 1024,
                output: false,
                silent: false,
                verbose: false,
            },
        }
    }

    pub fn model(mut self, model: &str) -> Self {
        self.args.model = Some(model.to_string());
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.args.length = length;
        self
    }

    pub fn output(mut self, val: bool) -> Self {
        self.args.output = val;
        self
    }

    pub fn silent(mut self, val: bool) -> Self {
        self.args.silent = val;
        self
    }

    pub fn verbose(mut self, val: bool) -> Self {
        self.args.verbose = val;
        self
    }

    pub fn build(self) -> GenerateArgs {
        self.args
    }
}

/// A filter engine that hands the program to `sh -c`.
///
/// Lets subprocess tests script the child's behaviour without depending on
/// `jq` being installed.
pub fn shell_engine() -> FilterEngine {
    FilterEngine::new("sh", vec!["-c".to_string()])
}
