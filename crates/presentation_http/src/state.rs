//! Application state shared across handlers

use std::{fmt, sync::Arc};

use application::SuggestionPort;
use infrastructure::{AppConfig, OpenWeatherAdapter};
use integration_openweather::OpenWeatherApi;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// OpenWeather API, used for the verbatim weather passthrough
    pub openweather: Arc<dyn OpenWeatherApi>,
    /// Geocoding suggestions
    pub suggestions: Arc<dyn SuggestionPort>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build the state around an OpenWeather API implementation
    pub fn new(openweather: Arc<dyn OpenWeatherApi>, config: AppConfig) -> Self {
        let suggestions = Arc::new(OpenWeatherAdapter::new(
            Arc::clone(&openweather),
            config.openweather.suggestion_limit,
        ));
        Self {
            openweather,
            suggestions,
            config: Arc::new(config),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
