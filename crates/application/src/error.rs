//! Application-level errors

use domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single outbound weather or suggestion fetch
///
/// The display form is the message shown on a city card after "Error: ".
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FetchError {
    /// The endpoint could not be reached
    #[error("{0}")]
    Transport(String),

    /// The endpoint answered with a non-success status
    #[error("{0}")]
    Upstream(String),

    /// The response did not carry the expected fields
    #[error("No weather data")]
    NoData,
}

impl FetchError {
    /// Whether this error renders as the "No weather data" placeholder
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),
}
