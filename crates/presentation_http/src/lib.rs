//! Weather proxy HTTP layer
//!
//! Serves the current-weather and suggestion routes so the API key stays
//! on the server.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
pub use routes::create_router;
pub use state::AppState;
