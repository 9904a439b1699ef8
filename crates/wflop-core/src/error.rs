//! Unified error types for the WFLOP bench ecosystem
//!
//! This module provides a common error type [`WflopError`] that can
//! represent errors from any part of the system. Domain-specific failures
//! are converted to `WflopError` for uniform handling at API boundaries.

use thiserror::Error;

/// Unified error type for all WFLOP bench operations.
#[derive(Error, Debug)]
pub enum WflopError {
    /// I/O errors (file access, unwritable output locations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data validation errors (malformed scenarios, bad parameter spaces)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Result artifacts missing required fields or carrying unparseable data
    #[error("Format error: {0}")]
    Format(String),

    /// A (problem, algorithm) pair appeared more than once for one metric
    #[error("ambiguous aggregation: duplicate ({problem}, {algorithm}) entry for metric '{metric}'")]
    AmbiguousAggregation {
        problem: String,
        algorithm: String,
        metric: String,
    },

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using WflopError.
pub type WflopResult<T> = Result<T, WflopError>;

impl From<anyhow::Error> for WflopError {
    fn from(err: anyhow::Error) -> Self {
        WflopError::Other(err.to_string())
    }
}

impl From<String> for WflopError {
    fn from(s: String) -> Self {
        WflopError::Other(s)
    }
}

impl From<&str> for WflopError {
    fn from(s: &str) -> Self {
        WflopError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for WflopError {
    fn from(err: serde_json::Error) -> Self {
        WflopError::Format(err.to_string())
    }
}
