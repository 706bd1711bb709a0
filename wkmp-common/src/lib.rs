//! # WKMP Common Library
//!
//! Shared code for WKMP modules including:
//! - Common error type
//! - TOML configuration file discovery and tiered setting resolution
//! - Human-readable duration formatting

pub mod config;
pub mod error;
pub mod human_time;

pub use error::{Error, Result};
