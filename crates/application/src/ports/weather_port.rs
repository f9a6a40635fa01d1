//! Weather fetcher port
//!
//! Defines the interface for retrieving current weather for a tracked city.

use async_trait::async_trait;
use domain::{CityName, WeatherSnapshot};
#[cfg(test)]
use mockall::automock;

use crate::error::FetchError;

/// Port for current-weather retrieval
///
/// Implementations issue exactly one outbound request per call and report
/// failures as they happen, without retrying.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch the current weather for a city
    async fn fetch_weather(&self, city: &CityName) -> Result<WeatherSnapshot, FetchError>;
}
