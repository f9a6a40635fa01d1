//! OpenWeather integration
//!
//! Client for the OpenWeather current-weather API
//! (<https://openweathermap.org/current>) and its direct geocoding API
//! (<https://openweathermap.org/api/geocoding-api>).
//!
//! Both endpoints authenticate with the same `appid` key. Without a key the
//! provider answers `401` and every call fails with
//! [`OpenWeatherError::Upstream`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_openweather::{OpenWeatherApi, OpenWeatherClient, OpenWeatherConfig};
//!
//! let client = OpenWeatherClient::new(OpenWeatherConfig::default())?;
//! let weather = client.current_weather("Paris").await?;
//! let places = client.geocode("Par", 5).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{OpenWeatherApi, OpenWeatherClient};
pub use config::OpenWeatherConfig;
pub use error::OpenWeatherError;
pub use models::{
    ConditionEntry, CurrentWeatherResponse, GeoPlace, MainReadings, UpstreamErrorBody, WindReadings,
};
