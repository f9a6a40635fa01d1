//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Weather proxy
        .route("/api/weather", get(handlers::weather::current_weather))
        .route("/api/suggestions", get(handlers::suggestions::suggestions))
        .layer(RequestIdLayer::new())
        // Attach state
        .with_state(state)
}
