// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "JSONSMITH_CONFIG";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load the effective configuration.
///
/// An explicitly requested file (`--config` or `JSONSMITH_CONFIG`) must
/// exist. The per-user default file is optional; without it the built-in
/// defaults apply.
pub fn load_effective(cli_path: Option<&Path>) -> Result<ConfigFile> {
    let explicit = cli_path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading explicit config");
        return load_and_validate(path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            debug!(path = %path.display(), "loading user config");
            load_and_validate(path)
        }
        _ => {
            debug!("no config file found; using built-in defaults");
            Ok(ConfigFile::default())
        }
    }
}

/// Per-user config location: `$XDG_CONFIG_HOME/jsonsmith/config.toml`,
/// falling back to `~/.config/jsonsmith/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    config_path_from(
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn config_path_from(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    let base = xdg_config_home
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| home.map(|h| h.join(".config")))?;
    Some(base.join("jsonsmith").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_config_home_wins_over_home() {
        let path = config_path_from(Some("/xdg".into()), Some("/home/u".into())).unwrap();
        assert_eq!(path, PathBuf::from("/xdg/jsonsmith/config.toml"));
    }

    #[test]
    fn empty_xdg_falls_back_to_home() {
        let path = config_path_from(Some(PathBuf::new()), Some("/home/u".into())).unwrap();
        assert_eq!(path, PathBuf::from("/home/u/.config/jsonsmith/config.toml"));
    }

    #[test]
    fn no_base_directory_means_no_default() {
        assert!(config_path_from(None, None).is_none());
    }
}
