// src/config/mod.rs

//! Configuration: TOML model, loading and validation.
//!
//! - [`model`] holds the serde structs and their defaults.
//! - [`loader`] finds and reads the file.
//! - `validate` implements `TryFrom<RawConfigFile> for ConfigFile`.

pub mod loader;
pub mod model;
mod validate;

pub use loader::{default_config_path, load_and_validate, load_effective, load_from_path};
pub use model::{ConfigFile, JqSection, LlmSection, RawConfigFile, SandboxSection};
