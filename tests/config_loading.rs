// tests/config_loading.rs

mod common;
use crate::common::builders::ConfigFileBuilder;

use std::io::Write;

use tempfile::NamedTempFile;

use jsonsmith::config::{ConfigFile, load_and_validate, load_effective};
use jsonsmith::errors::JsonsmithError;

#[test]
fn full_config_is_loaded() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[llm]
base_url = "http://localhost:11434/v1"
default_model = "qwen2.5-coder:14b"
api_key_env = "LOCAL_KEY"
timeout_secs = 30
temperature = 0.2

[llm.aliases]
fast = "qwen2.5-coder:1.5b"

[jq]
binary = "/usr/local/bin/jq"
args = ["--compact-output"]

[sandbox]
language = "PYTHON"
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.llm.base_url, "http://localhost:11434/v1");
    assert_eq!(cfg.llm.timeout_secs, 30);
    assert_eq!(cfg.llm.temperature, Some(0.2));
    assert_eq!(cfg.resolve_model(Some("fast")), "qwen2.5-coder:1.5b");
    assert_eq!(cfg.resolve_model(None), "qwen2.5-coder:14b");
    assert_eq!(cfg.jq.args, vec!["--compact-output".to_string()]);
    assert_eq!(cfg.sandbox.base_url, "https://api.riza.io");
}

#[test]
fn zero_timeout_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[llm]\ntimeout_secs = 0\n").unwrap();

    match load_and_validate(file.path()) {
        Err(JsonsmithError::ConfigError(msg)) => assert!(msg.contains("timeout_secs")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_key_returns_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[llm]\nmodel_name = \"oops\"\n").unwrap();

    match load_and_validate(file.path()) {
        Err(JsonsmithError::TomlError(_)) => {}
        Err(e) => panic!("Expected TomlError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn explicit_path_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    assert!(matches!(
        load_effective(Some(missing.as_path())),
        Err(JsonsmithError::IoError(_))
    ));
}

#[test]
fn explicit_path_is_honoured() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[jq]\nbinary = \"gojq\"\n").unwrap();

    let cfg = load_effective(Some(file.path())).unwrap();
    assert_eq!(cfg.jq.binary, "gojq");
}

#[test]
fn builder_matches_defaults() {
    assert_eq!(ConfigFileBuilder::new().build(), ConfigFile::default());
}
