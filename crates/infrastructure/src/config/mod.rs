//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings for the weather proxy
//! - `dashboard`: terminal dashboard client settings
//!
//! The `openweather` section reuses the integration crate's configuration.

mod dashboard;
mod server;

use integration_openweather::OpenWeatherConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use dashboard::DashboardConfig;
pub use server::ServerConfig;

/// Prefix of environment variables overriding configuration values
pub const ENV_PREFIX: &str = "WEATHER_DASHBOARD";

/// Environment variable holding the OpenWeather API key
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// OpenWeather API configuration
    #[serde(default)]
    pub openweather: OpenWeatherConfig,

    /// Dashboard client configuration
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// Sources, later ones winning: built-in defaults, an optional
    /// `config.toml` in the working directory, `WEATHER_DASHBOARD__*`
    /// variables (e.g. `WEATHER_DASHBOARD__SERVER__PORT`), and finally
    /// `OPENWEATHER_API_KEY` for the API key.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .with_list_parse_key("dashboard.default_cities"),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config.with_api_key(std::env::var(API_KEY_ENV).ok()))
    }

    /// Override the OpenWeather API key when one is given
    ///
    /// Blank keys are ignored.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        match api_key {
            Some(key) if !key.trim().is_empty() => {
                debug!("Using OpenWeather API key from {API_KEY_ENV}");
                self.openweather.api_key = Some(SecretString::from(key.trim().to_string()));
            },
            Some(_) => warn!("{API_KEY_ENV} is set but blank, ignoring"),
            None => {},
        }
        self
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.openweather
            .validate()
            .map_err(|e| format!("openweather.{e}"))?;
        self.dashboard.validate()
    }
}
