//! API error handling
//!
//! Every failure is answered with an [`ErrorResponse`] body. Provider
//! failures keep the provider's message so clients can show it.

use application::FetchError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use integration_openweather::OpenWeatherError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Weather provider call failed
    #[error("{0}")]
    Upstream(String),
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl ApiError {
    /// Status code answered for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::BadRequest(msg) => ErrorResponse {
                error: msg,
                code: "bad_request".to_string(),
            },
            Self::Upstream(msg) => ErrorResponse {
                error: msg,
                code: "upstream_error".to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<OpenWeatherError> for ApiError {
    fn from(err: OpenWeatherError) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
