//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod openweather_adapter;
mod proxy_adapter;

pub use openweather_adapter::{OpenWeatherAdapter, map_openweather_error};
pub use proxy_adapter::{ProxyAdapter, ProxyErrorBody, snapshot_from_response};
