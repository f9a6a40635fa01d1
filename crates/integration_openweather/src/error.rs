//! OpenWeather error types

use thiserror::Error;

/// Errors that can occur when talking to OpenWeather
#[derive(Debug, Clone, Error)]
pub enum OpenWeatherError {
    /// HTTP client could not be built or the host was unreachable
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request did not complete within the configured timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Provider answered with a non-success status
    #[error("{message}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Message from the provider body, or the status line
        message: String,
    },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl OpenWeatherError {
    /// HTTP status returned by the provider, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the provider rejected the API key
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Upstream { status: 401, .. })
    }

    /// Whether the failure happened before any response arrived
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_) | Self::Timeout { .. })
    }
}
