// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{JsonsmithError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::JsonsmithError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.llm, raw.jq, raw.sandbox))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_llm(cfg)?;
    validate_aliases(cfg)?;
    validate_jq(cfg)?;
    validate_sandbox(cfg)?;
    Ok(())
}

fn config_error(msg: impl Into<String>) -> JsonsmithError {
    JsonsmithError::ConfigError(msg.into())
}

fn validate_llm(cfg: &RawConfigFile) -> Result<()> {
    let llm = &cfg.llm;

    if llm.base_url.trim().is_empty() {
        return Err(config_error("[llm].base_url must not be empty"));
    }
    if llm.default_model.trim().is_empty() {
        return Err(config_error("[llm].default_model must not be empty"));
    }
    if llm.timeout_secs == 0 {
        return Err(config_error("[llm].timeout_secs must be >= 1 (got 0)"));
    }
    if let Some(t) = llm.temperature {
        if !(0.0..=2.0).contains(&t) {
            return Err(config_error(format!(
                "[llm].temperature must be between 0.0 and 2.0 (got {t})"
            )));
        }
    }

    Ok(())
}

fn validate_aliases(cfg: &RawConfigFile) -> Result<()> {
    for (alias, target) in cfg.llm.aliases.iter() {
        if alias.trim().is_empty() {
            return Err(config_error("[llm.aliases] contains an empty alias name"));
        }
        if target.trim().is_empty() {
            return Err(config_error(format!(
                "alias '{}' in [llm.aliases] points to an empty model id",
                alias
            )));
        }
    }
    Ok(())
}

fn validate_jq(cfg: &RawConfigFile) -> Result<()> {
    if cfg.jq.binary.trim().is_empty() {
        return Err(config_error("[jq].binary must not be empty"));
    }
    Ok(())
}

fn validate_sandbox(cfg: &RawConfigFile) -> Result<()> {
    let sandbox = &cfg.sandbox;

    if sandbox.base_url.trim().is_empty() {
        return Err(config_error("[sandbox].base_url must not be empty"));
    }
    if sandbox.language.trim().is_empty() {
        return Err(config_error("[sandbox].language must not be empty"));
    }
    if sandbox.timeout_secs == 0 {
        return Err(config_error("[sandbox].timeout_secs must be >= 1 (got 0)"));
    }
    Ok(())
}
