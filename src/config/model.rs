// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Raw config as deserialized from TOML, before validation.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub llm: LlmSection,

    #[serde(default)]
    pub jq: JqSection,

    #[serde(default)]
    pub sandbox: SandboxSection,
}

/// `[llm]`: the text-generation backend.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LlmSection {
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`).
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Model used when `-m` is not given.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Environment variable holding the API key. If it is unset, requests
    /// go out without an `Authorization` header (local servers).
    #[serde(default = "default_llm_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub temperature: Option<f32>,

    /// Short names for model ids, usable with `-m`.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            default_model: default_model(),
            api_key_env: default_llm_key_env(),
            timeout_secs: default_timeout_secs(),
            temperature: None,
            aliases: BTreeMap::new(),
        }
    }
}

/// `[jq]`: the local filter engine.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct JqSection {
    #[serde(default = "default_jq_binary")]
    pub binary: String,

    /// Arguments placed before the generated program.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for JqSection {
    fn default() -> Self {
        Self {
            binary: default_jq_binary(),
            args: Vec::new(),
        }
    }
}

/// `[sandbox]`: the remote code-execution service.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SandboxSection {
    #[serde(default = "default_sandbox_base_url")]
    pub base_url: String,

    #[serde(default = "default_sandbox_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SandboxSection {
    fn default() -> Self {
        Self {
            base_url: default_sandbox_base_url(),
            api_key_env: default_sandbox_key_env(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_llm_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
fn default_timeout_secs() -> u64 {
    120
}
fn default_jq_binary() -> String {
    "jq".to_string()
}
fn default_sandbox_base_url() -> String {
    "https://api.riza.io".to_string()
}
fn default_sandbox_key_env() -> String {
    "LLM_RIZA_KEY".to_string()
}
fn default_language() -> String {
    "PYTHON".to_string()
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// [`ConfigFile::default`], so holders can rely on the invariants checked
/// there.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub llm: LlmSection,
    pub jq: JqSection,
    pub sandbox: SandboxSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(llm: LlmSection, jq: JqSection, sandbox: SandboxSection) -> Self {
        Self { llm, jq, sandbox }
    }

    /// Resolve the `-m` selector: alias target, literal id, or the default.
    pub fn resolve_model<'a>(&'a self, selector: Option<&'a str>) -> &'a str {
        match selector {
            Some(name) => self.llm.aliases.get(name).map(String::as_str).unwrap_or(name),
            None => &self.llm.default_model,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let raw = RawConfigFile::default();
        Self::new_unchecked(raw.llm, raw.jq, raw.sandbox)
    }
}
