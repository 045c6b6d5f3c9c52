//! Error types for queue operations.

use thiserror::Error;

/// Errors produced by queue components.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueueError {
    /// The queue holds no elements.
    #[error("queue empty")]
    Empty,
    /// Weight is zero, negative, NaN or infinite.
    #[error("invalid weight: {0}")]
    InvalidWeight(f64),
    /// Configuration failed to parse or validate.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl QueueError {
    /// Whether this error only means "no work available right now".
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
