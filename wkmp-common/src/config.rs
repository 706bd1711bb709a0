//! Configuration file discovery and tiered setting resolution
//!
//! Every WKMP module resolves its settings in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file never stops a module: it logs and falls back to
//! defaults. A TOML file that exists but cannot be parsed is an error.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Logging section shared by all module TOML files
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Locate the TOML config file for a module
///
/// Looks for `<config_dir>/wkmp/<module>.toml` first and, on Linux,
/// `/etc/wkmp/<module>.toml` second. Returns `None` when neither exists.
pub fn module_config_path(module_name: &str) -> Option<PathBuf> {
    let file_name = format!("{}.toml", module_name);

    let user_config = dirs::config_dir().map(|d| d.join("wkmp").join(&file_name));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/wkmp").join(&file_name);
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Parse a TOML config file into `T`
pub fn load_toml_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load a module's TOML config
///
/// An explicit path (from the command line) must exist. Without one, the
/// standard locations are searched and `T::default()` is used when nothing
/// is found.
pub fn load_module_config<T>(explicit_path: Option<&Path>, module_name: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if let Some(path) = explicit_path {
        if !path.exists() {
            return Err(Error::NotFound(format!(
                "Config file {} does not exist",
                path.display()
            )));
        }
        debug!("Loading {} config from {}", module_name, path.display());
        return load_toml_file(path);
    }

    match module_config_path(module_name) {
        Some(path) => {
            debug!("Loading {} config from {}", module_name, path.display());
            load_toml_file(&path)
        }
        None => {
            info!(
                "No config file found for {} (using compiled defaults)",
                module_name
            );
            Ok(T::default())
        }
    }
}

/// Read and parse an environment variable override
///
/// Unset or blank variables yield `Ok(None)`; a value that does not parse is
/// a configuration error naming the variable.
pub fn env_override<T: FromStr>(var_name: &str) -> Result<Option<T>> {
    match std::env::var(var_name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has an invalid value: {:?}", var_name, raw))),
        _ => Ok(None),
    }
}

/// Pick the first available value in WKMP priority order
pub fn resolve_setting<T>(cli: Option<T>, env: Option<T>, file: Option<T>, default: T) -> T {
    cli.or(env).or(file).unwrap_or(default)
}
