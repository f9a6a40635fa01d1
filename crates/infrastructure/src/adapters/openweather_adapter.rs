//! OpenWeather adapter - Implements the ports directly against OpenWeather
//!
//! Used when an API key is available locally, so no proxy is needed.

use std::{fmt, sync::Arc};

use application::{FetchError, SuggestionPort, WeatherPort};
use async_trait::async_trait;
use domain::{CityName, Suggestion, WeatherSnapshot};
use integration_openweather::{OpenWeatherApi, OpenWeatherClient, OpenWeatherConfig, OpenWeatherError};
use tracing::{debug, instrument};

use super::proxy_adapter::snapshot_from_response;

/// Map an OpenWeather client error to a fetch error
#[must_use]
pub fn map_openweather_error(err: OpenWeatherError) -> FetchError {
    match err {
        OpenWeatherError::ConnectionFailed(_) | OpenWeatherError::Timeout { .. } => {
            FetchError::Transport(err.to_string())
        },
        OpenWeatherError::Upstream { message, .. } => FetchError::Upstream(message),
        OpenWeatherError::ParseError(e) => FetchError::Upstream(e),
    }
}

/// Adapter for the OpenWeather API
pub struct OpenWeatherAdapter {
    api: Arc<dyn OpenWeatherApi>,
    suggestion_limit: u8,
}

impl fmt::Debug for OpenWeatherAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherAdapter")
            .field("api", &"OpenWeatherApi")
            .field("suggestion_limit", &self.suggestion_limit)
            .finish()
    }
}

impl OpenWeatherAdapter {
    /// Wrap an existing API implementation
    pub fn new(api: Arc<dyn OpenWeatherApi>, suggestion_limit: u8) -> Self {
        Self {
            api,
            suggestion_limit,
        }
    }

    /// Create with a fresh HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: OpenWeatherConfig) -> Result<Self, FetchError> {
        let limit = config.suggestion_limit;
        let client = OpenWeatherClient::new(config).map_err(map_openweather_error)?;
        Ok(Self::new(Arc::new(client), limit))
    }
}

#[async_trait]
impl WeatherPort for OpenWeatherAdapter {
    #[instrument(skip(self, city), fields(city = %city))]
    async fn fetch_weather(&self, city: &CityName) -> Result<WeatherSnapshot, FetchError> {
        let body = self
            .api
            .current_weather(city.as_str())
            .await
            .map_err(|e| match e {
                OpenWeatherError::ParseError(_) => FetchError::NoData,
                other => map_openweather_error(other),
            })?;
        snapshot_from_response(body)
    }
}

#[async_trait]
impl SuggestionPort for OpenWeatherAdapter {
    #[instrument(skip(self))]
    async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        let places = self
            .api
            .geocode(query, self.suggestion_limit)
            .await
            .map_err(map_openweather_error)?;

        debug!(count = places.len(), "Geocoding suggestions");
        Ok(places
            .into_iter()
            .map(|p| Suggestion {
                name: p.name,
                country: p.country,
                state: p.state,
            })
            .collect())
    }
}
