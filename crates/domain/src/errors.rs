//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// City name was empty after trimming
    #[error("Invalid city name: {0}")]
    InvalidCityName(String),

    /// Timestamp cannot be represented as a calendar date
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}
