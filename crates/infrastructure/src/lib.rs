//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the weather
//! proxy and the OpenWeather API, and hosts configuration loading and
//! tracing setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, DashboardConfig, ServerConfig};
pub use telemetry::{LogFormat, init_tracing};
