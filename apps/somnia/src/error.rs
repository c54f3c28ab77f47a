//! Application error type.

use somnia_core::ReadingError;
use thiserror::Error;

/// Errors surfaced by CLI commands and the monitor loop.
#[derive(Debug, Error)]
pub enum CliError {
    /// Caller-supplied values failed validation.
    #[error("invalid reading: {0}")]
    Reading(#[from] ReadingError),

    /// Writing rendered output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The tick interval was zero.
    #[error("interval must be at least 1 ms")]
    ZeroInterval,
}
