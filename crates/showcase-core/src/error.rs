//! Error types for the showcase components
//!
//! Covers the conditions the demos propagate to their callers:
//! - Malformed numeric input
//! - Reads of unbound context keys
//! - Fan-out worker failures and deadlines

use std::num::ParseIntError;

/// Main showcase error type
#[derive(Debug, thiserror::Error)]
pub enum ShowcaseError {
    /// Text could not be parsed as an integer
    #[error("invalid number {input:?}: {source}")]
    InvalidNumber {
        /// The offending text
        input: String,
        /// Parser failure
        #[source]
        source: ParseIntError,
    },

    /// Context key read outside of any binding
    #[error("context key not bound: {0}")]
    Unbound(&'static str),

    /// A fan-out worker panicked or was aborted
    #[error("worker failed: {0}")]
    WorkerFailed(String),

    /// Deadline expired before every worker finished
    #[error("operation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Every source in a race failed
    #[error("all {attempted} sources failed")]
    AllSourcesFailed { attempted: usize },
}

impl ShowcaseError {
    /// Check if error comes from bad caller input
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidNumber { .. })
    }

    /// Check if error is a deadline expiry
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<tokio::task::JoinError> for ShowcaseError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            Self::WorkerFailed("worker cancelled".to_string())
        } else {
            Self::WorkerFailed(format!("worker panicked: {err}"))
        }
    }
}

/// Result alias used across the showcase components
pub type Result<T, E = ShowcaseError> = std::result::Result<T, E>;
