//! Curator error types

use thiserror::Error;

/// Result type for curator operations
pub type Result<T> = std::result::Result<T, CurationError>;

/// Errors raised by the curator
///
/// Malformed album data is never an error: it is defaulted during
/// reconciliation. Only caller contract violations and I/O at the edges
/// surface here.
#[derive(Error, Debug)]
pub enum CurationError {
    /// Options that violate the caller contract (zero target, zero budget)
    #[error("Invalid curation options: {0}")]
    InvalidOptions(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Album input or result output could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Shared WKMP error (configuration loading, overrides)
    #[error(transparent)]
    Common(#[from] wkmp_common::Error),
}
