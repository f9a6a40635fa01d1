//! OpenWeather HTTP client
//!
//! Each call issues exactly one outbound request. There is no retry and no
//! caching at this level; failures are returned to the caller as they happen.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::ExposeSecret;
use tracing::{debug, instrument, warn};

use crate::{
    config::OpenWeatherConfig,
    error::OpenWeatherError,
    models::{CurrentWeatherResponse, GeoPlace, UpstreamErrorBody},
};

/// Path of the current-weather endpoint
const WEATHER_PATH: &str = "/data/2.5/weather";

/// Path of the direct geocoding endpoint
const GEOCODING_PATH: &str = "/geo/1.0/direct";

/// Operations offered by the OpenWeather API
#[async_trait]
pub trait OpenWeatherApi: Send + Sync {
    /// Current weather for a city, as the untouched JSON body
    async fn current_weather_raw(&self, city: &str) -> Result<serde_json::Value, OpenWeatherError>;

    /// Current weather for a city, decoded
    async fn current_weather(&self, city: &str) -> Result<CurrentWeatherResponse, OpenWeatherError> {
        let raw = self.current_weather_raw(city).await?;
        serde_json::from_value(raw).map_err(|e| OpenWeatherError::ParseError(e.to_string()))
    }

    /// Places matching a free-form query, in provider order
    async fn geocode(&self, query: &str, limit: u8) -> Result<Vec<GeoPlace>, OpenWeatherError>;
}

/// reqwest-based OpenWeather client
#[derive(Debug)]
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, OpenWeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OpenWeatherError::ConnectionFailed(e.to_string()))?;

        if !config.has_api_key() {
            warn!("No OpenWeather API key configured, requests will be rejected upstream");
        }

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, OpenWeatherError> {
        Self::new(OpenWeatherConfig::default())
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &OpenWeatherConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// `appid` query parameter, omitted when no key is configured
    fn auth_params(&self) -> Vec<(&'static str, String)> {
        self.config
            .api_key
            .as_ref()
            .map(|key| vec![("appid", key.expose_secret().to_string())])
            .unwrap_or_default()
    }

    fn map_send_error(&self, e: &reqwest::Error) -> OpenWeatherError {
        if e.is_timeout() {
            OpenWeatherError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            OpenWeatherError::ConnectionFailed(e.to_string())
        }
    }

    /// Turn a non-success response into an upstream error
    ///
    /// The provider's `message` is used when the body carries one.
    async fn upstream_error(response: Response) -> OpenWeatherError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<UpstreamErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

        warn!(status = status.as_u16(), %message, "OpenWeather request rejected");

        OpenWeatherError::Upstream {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl OpenWeatherApi for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current_weather_raw(&self, city: &str) -> Result<serde_json::Value, OpenWeatherError> {
        let url = self.url(WEATHER_PATH);
        let mut params = vec![("q", city.to_string()), ("units", self.config.units.clone())];
        params.extend(self.auth_params());

        debug!(url = %url, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| OpenWeatherError::ParseError(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn geocode(&self, query: &str, limit: u8) -> Result<Vec<GeoPlace>, OpenWeatherError> {
        let url = self.url(GEOCODING_PATH);
        let limit = limit.clamp(1, self.config.suggestion_limit.max(1));
        let mut params = vec![("q", query.to_string()), ("limit", limit.to_string())];
        params.extend(self.auth_params());

        debug!(url = %url, limit, "Geocoding query");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let places: Vec<GeoPlace> = response
            .json()
            .await
            .map_err(|e| OpenWeatherError::ParseError(e.to_string()))?;

        debug!(count = places.len(), "Geocoding returned places");
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(OpenWeatherClient::with_defaults().is_ok());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client =
            OpenWeatherClient::new(OpenWeatherConfig::for_testing("http://localhost:8080/"))
                .unwrap();
        assert_eq!(
            client.url(WEATHER_PATH),
            "http://localhost:8080/data/2.5/weather"
        );
    }

    #[test]
    fn test_auth_params_omitted_without_key() {
        let client = OpenWeatherClient::with_defaults().unwrap();
        assert!(client.auth_params().is_empty());

        let client =
            OpenWeatherClient::new(OpenWeatherConfig::for_testing("http://localhost")).unwrap();
        assert_eq!(client.auth_params(), vec![("appid", "test-key".to_string())]);
    }

    #[test]
    fn test_config_accessor() {
        let client = OpenWeatherClient::with_defaults().unwrap();
        assert_eq!(client.config().units, "metric");
    }
}
