//! Error types for bottle-sort.
//!
//! Only caller contract violations are errors. A move the rules reject is
//! ordinary input and is reported as a zero amount or `None`, never as `Err`.

use thiserror::Error;

/// Main error type for engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument broke the operation's contract (zero capacity, negative
    /// counter, non-positive level index, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not valid for the current state of the receiver.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Scoring configuration could not be read or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn invalid_operation(msg: impl Into<String>) -> Self {
        Error::InvalidOperation(msg.into())
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
