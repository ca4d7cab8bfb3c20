//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The authorization status string is not recognized.
    #[error("unknown authorization status: {0}")]
    UnknownStatus(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
