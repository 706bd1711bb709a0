//! Curation options and their tiered resolution
//!
//! Each option resolves in WKMP priority order: command line, then
//! environment (`WKMP_PC_*`), then `wkmp-pc.toml`, then compiled default.

use crate::error::{CurationError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use wkmp_common::config::{env_override, load_module_config, resolve_setting, LoggingConfig};

/// Module name used for config file discovery
pub const MODULE_NAME: &str = "wkmp-pc";

pub const TARGET_SECONDS_ENV: &str = "WKMP_PC_TARGET_SECONDS";
pub const TOLERANCE_SECONDS_ENV: &str = "WKMP_PC_TOLERANCE_SECONDS";
pub const MAX_SWAP_ITERATIONS_ENV: &str = "WKMP_PC_MAX_SWAP_ITERATIONS";

/// 45 minutes
pub const DEFAULT_TARGET_SECONDS: u64 = 2700;
/// 7 minutes either side of the target
pub const DEFAULT_TOLERANCE_SECONDS: u64 = 420;
pub const DEFAULT_MAX_SWAP_ITERATIONS: u32 = 100;

/// Knobs of a single curation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurationOptions {
    /// Target playlist length T
    pub target_seconds: u64,
    /// Accepted deviation from T when balancing
    pub tolerance_seconds: u64,
    /// Hard bound on balancer iterations
    pub max_swap_iterations: u32,
}

impl Default for CurationOptions {
    fn default() -> Self {
        Self {
            target_seconds: DEFAULT_TARGET_SECONDS,
            tolerance_seconds: DEFAULT_TOLERANCE_SECONDS,
            max_swap_iterations: DEFAULT_MAX_SWAP_ITERATIONS,
        }
    }
}

impl CurationOptions {
    pub fn validate(&self) -> Result<()> {
        if self.target_seconds == 0 {
            return Err(CurationError::InvalidOptions(
                "target_seconds must be greater than zero".to_string(),
            ));
        }
        if self.max_swap_iterations == 0 {
            return Err(CurationError::InvalidOptions(
                "max_swap_iterations must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Lower edge of the tolerance band
    pub fn lower_bound(&self) -> u64 {
        self.target_seconds.saturating_sub(self.tolerance_seconds)
    }

    /// Upper edge of the tolerance band
    pub fn upper_bound(&self) -> u64 {
        self.target_seconds.saturating_add(self.tolerance_seconds)
    }
}

/// Contents of `wkmp-pc.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CuratorToml {
    pub logging: LoggingConfig,
    pub curation: CurationSection,
}

/// `[curation]` table; unset keys fall through to defaults
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CurationSection {
    pub target_seconds: Option<u64>,
    pub tolerance_seconds: Option<u64>,
    pub max_swap_iterations: Option<u32>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionOverrides {
    pub target_seconds: Option<u64>,
    pub tolerance_seconds: Option<u64>,
    pub max_swap_iterations: Option<u32>,
}

/// Load `wkmp-pc.toml` from an explicit path or the standard locations
pub fn load_config(explicit_path: Option<&Path>) -> Result<CuratorToml> {
    Ok(load_module_config(explicit_path, MODULE_NAME)?)
}

/// Resolve options: command line > environment > TOML > default
pub fn resolve_options(cli: &OptionOverrides, file: &CurationSection) -> Result<CurationOptions> {
    let defaults = CurationOptions::default();

    let options = CurationOptions {
        target_seconds: resolve_setting(
            cli.target_seconds,
            env_override(TARGET_SECONDS_ENV)?,
            file.target_seconds,
            defaults.target_seconds,
        ),
        tolerance_seconds: resolve_setting(
            cli.tolerance_seconds,
            env_override(TOLERANCE_SECONDS_ENV)?,
            file.tolerance_seconds,
            defaults.tolerance_seconds,
        ),
        max_swap_iterations: resolve_setting(
            cli.max_swap_iterations,
            env_override(MAX_SWAP_ITERATIONS_ENV)?,
            file.max_swap_iterations,
            defaults.max_swap_iterations,
        ),
    };

    debug!(
        "Resolved curation options: target={}s tolerance={}s max_swap_iterations={}",
        options.target_seconds, options.tolerance_seconds, options.max_swap_iterations
    );

    options.validate()?;
    Ok(options)
}
