//! Weather snapshot entity
//!
//! One observation of current weather for a tracked city, as fetched through
//! the proxy. Snapshots are immutable; a refetch produces a new snapshot.

use serde::{Deserialize, Serialize};

use crate::{condition::Condition, value_objects::Humidity};

/// Current weather for one city at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Provider category as received (e.g. "Clouds")
    pub condition_main: String,
    /// Provider description as received (e.g. "light snow with thunder")
    pub description: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Apparent temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity
    pub humidity: Humidity,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Shift in seconds from UTC for the observed location
    pub timezone_offset_seconds: i32,
    /// Location name reported by the provider
    pub location_name: String,
}

impl WeatherSnapshot {
    /// Canonical condition derived from `condition_main`
    #[must_use]
    pub fn condition(&self) -> Condition {
        Condition::parse(&self.condition_main)
    }

    /// One-line summary used in logs and the terminal client
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: {} ({}), {}°C (feels like {}°C), humidity {}, wind {} m/s",
            self.location_name,
            self.condition(),
            self.description,
            self.temperature,
            self.feels_like,
            self.humidity,
            self.wind_speed
        )
    }
}
