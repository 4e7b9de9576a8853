// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Context, Result};

use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;

/// Load a configuration file from a given path and return the raw `ConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (guard labels, step references, glob compilation). Use
/// [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file at {:?}", path))?;

    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML config from {:?}", path))?;

    Ok(config)
}

/// Load a configuration file from path and run semantic validation.
///
/// This is the recommended entry point for the rest of the application.
/// Any validation failure aborts the run before a single step executes:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - at least one step, with unique names,
///   - `after` references that name an earlier step,
///   - guard expressions that parse and use declared filter labels,
///   - filter and ignore globs that compile.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `Changegate.toml` in the current working
/// directory; it exists so config discovery (env var, parent directories)
/// has one place to grow into.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Changegate.toml")
}
