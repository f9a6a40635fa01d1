//! Proxy adapter - Implements WeatherPort and SuggestionPort over the weather proxy
//!
//! The proxy hides the API key. Weather comes back as the provider's JSON
//! body, errors as `{"error": "<message>"}`.

use std::time::Duration;

use application::{FetchError, SuggestionPort, WeatherPort};
use async_trait::async_trait;
use domain::{CityName, Humidity, Suggestion, WeatherSnapshot};
use integration_openweather::CurrentWeatherResponse;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::config::DashboardConfig;

/// Request correlation header understood by the proxy
const X_REQUEST_ID: &str = "x-request-id";

/// Error body returned by the proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyErrorBody {
    pub error: String,
}

/// Build a snapshot from a current-weather body
///
/// # Errors
///
/// Returns `FetchError::NoData` if the condition, readings or wind are missing.
pub fn snapshot_from_response(body: CurrentWeatherResponse) -> Result<WeatherSnapshot, FetchError> {
    let condition = body.primary_condition().ok_or(FetchError::NoData)?;
    let main = body.main.as_ref().ok_or(FetchError::NoData)?;
    let wind = body.wind.as_ref().ok_or(FetchError::NoData)?;

    Ok(WeatherSnapshot {
        condition_main: condition.main.clone(),
        description: condition.description.clone(),
        temperature: main.temp,
        feels_like: main.feels_like,
        humidity: Humidity::from_reading(main.humidity),
        wind_speed: wind.speed,
        timezone_offset_seconds: body.timezone.unwrap_or_default(),
        location_name: body.name,
    })
}

/// Adapter for the weather proxy's `/api/weather` and `/api/suggestions` routes
#[derive(Debug, Clone)]
pub struct ProxyAdapter {
    client: Client,
    base_url: String,
}

impl ProxyAdapter {
    /// Create an adapter for the proxy at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create an adapter from the dashboard configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, FetchError> {
        Self::new(
            config.proxy_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Base URL of the proxy
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response, FetchError> {
        let url = format!("{}{path}", self.base_url);
        let request_id = Uuid::now_v7();
        debug!(url = %url, request_id = %request_id, "Calling weather proxy");

        let response = self
            .client
            .get(&url)
            .query(query)
            .header(X_REQUEST_ID, request_id.to_string())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ProxyErrorBody>(&body)
            .map(|b| b.error)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {status}"));

        warn!(status, %message, "Weather proxy returned an error");
        Err(FetchError::Upstream(message))
    }
}

#[async_trait]
impl WeatherPort for ProxyAdapter {
    #[instrument(skip(self, city), fields(city = %city))]
    async fn fetch_weather(&self, city: &CityName) -> Result<WeatherSnapshot, FetchError> {
        let response = self.get("/api/weather", &[("city", city.as_str())]).await?;

        let body: CurrentWeatherResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Weather body is not usable");
            FetchError::NoData
        })?;

        snapshot_from_response(body)
    }
}

#[async_trait]
impl SuggestionPort for ProxyAdapter {
    #[instrument(skip(self))]
    async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        let response = self.get("/api/suggestions", &[("q", query)]).await?;

        response
            .json()
            .await
            .map_err(|e| FetchError::Upstream(format!("Invalid suggestions body: {e}")))
    }
}
