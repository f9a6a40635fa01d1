//! OpenWeather data models
//!
//! Response shapes of the current-weather and geocoding endpoints. Only the
//! fields the dashboard reads are modelled; everything else is ignored.
//! Sections the dashboard depends on are optional so that a response with a
//! missing section still decodes and can be reported as "no data".

use serde::{Deserialize, Serialize};

/// Body of `GET /data/2.5/weather`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    /// Location name
    #[serde(default)]
    pub name: String,
    /// Condition entries, most significant first
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    /// Temperature and humidity readings
    #[serde(default)]
    pub main: Option<MainReadings>,
    /// Wind readings
    #[serde(default)]
    pub wind: Option<WindReadings>,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone: Option<i32>,
}

impl CurrentWeatherResponse {
    /// The primary condition entry, if present
    #[must_use]
    pub fn primary_condition(&self) -> Option<&ConditionEntry> {
        self.weather.first()
    }
}

/// One entry of the `weather` array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionEntry {
    /// Condition group (Rain, Snow, Clouds, ...)
    #[serde(default)]
    pub main: String,
    /// Condition within the group, lower case
    #[serde(default)]
    pub description: String,
}

/// The `main` object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    /// Temperature in the requested units
    pub temp: f64,
    /// Apparent temperature in the requested units
    pub feels_like: f64,
    /// Relative humidity, %
    pub humidity: f64,
}

/// The `wind` object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindReadings {
    /// Wind speed (m/s for metric units)
    pub speed: f64,
}

/// One result of `GET /geo/1.0/direct`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPlace {
    /// Place name
    pub name: String,
    /// ISO 3166 country code
    #[serde(default)]
    pub country: String,
    /// State or region, where available
    #[serde(default)]
    pub state: Option<String>,
    /// Latitude
    #[serde(default)]
    pub lat: f64,
    /// Longitude
    #[serde(default)]
    pub lon: f64,
}

/// Error body returned by OpenWeather on non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamErrorBody {
    /// Status code, sent as a number or a string depending on the endpoint
    #[serde(default)]
    pub cod: serde_json::Value,
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_response_parsing() {
        let json = r#"{
            "coord": {"lon": 2.35, "lat": 48.85},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 20, "feels_like": 19, "temp_min": 18, "humidity": 40},
            "wind": {"speed": 3, "deg": 200},
            "timezone": 3600,
            "name": "Paris",
            "cod": 200
        }"#;
        let response: CurrentWeatherResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.name, "Paris");
        assert_eq!(response.primary_condition().unwrap().main, "Clear");
        assert!((response.main.unwrap().temp - 20.0).abs() < f64::EPSILON);
        assert!((response.wind.unwrap().speed - 3.0).abs() < f64::EPSILON);
        assert_eq!(response.timezone, Some(3600));
    }

    #[test]
    fn test_missing_sections_still_parse() {
        let response: CurrentWeatherResponse = serde_json::from_str(r#"{"name":"Nowhere"}"#).unwrap();
        assert!(response.primary_condition().is_none());
        assert!(response.main.is_none());
        assert!(response.wind.is_none());
    }

    #[test]
    fn test_geo_place_parsing() {
        let json = r#"[{"name":"Paris","local_names":{"fr":"Paris"},"lat":48.85,"lon":2.35,"country":"FR","state":"Ile-de-France"}]"#;
        let places: Vec<GeoPlace> = serde_json::from_str(json).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].country, "FR");
        assert_eq!(places[0].state.as_deref(), Some("Ile-de-France"));
    }

    #[test]
    fn test_error_body_accepts_string_or_number_cod() {
        let body: UpstreamErrorBody =
            serde_json::from_str(r#"{"cod":"404","message":"city not found"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("city not found"));

        let body: UpstreamErrorBody = serde_json::from_str(r#"{"cod":401}"#).unwrap();
        assert!(body.message.is_none());
    }
}
