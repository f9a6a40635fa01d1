//! OpenWeather client configuration

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Configuration for the OpenWeather API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    /// API base URL, hosting both `/data/2.5/weather` and `/geo/1.0/direct`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `appid` (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Unit system requested from the provider
    #[serde(default = "default_units")]
    pub units: String,

    /// Maximum number of places requested from the geocoding API
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: u8,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_units() -> String {
    "metric".to_string()
}

const fn default_suggestion_limit() -> u8 {
    5
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            units: default_units(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

impl OpenWeatherConfig {
    /// Create a configuration pointing at a local test server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: Some(SecretString::from("test-key")),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Whether an API key is configured
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.suggestion_limit == 0 || self.suggestion_limit > 5 {
            return Err("suggestion_limit must be between 1 and 5".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpenWeatherConfig::default();
        assert_eq!(config.base_url, "https://api.openweathermap.org");
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.units, "metric");
        assert_eq!(config.suggestion_limit, 5);
    }

    #[test]
    fn test_testing_config_has_key() {
        let config = OpenWeatherConfig::for_testing("http://127.0.0.1:9");
        assert!(config.has_api_key());
        assert_eq!(config.base_url, "http://127.0.0.1:9");
    }

    #[test]
    fn test_validation() {
        assert!(OpenWeatherConfig::default().validate().is_ok());

        let config = OpenWeatherConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = OpenWeatherConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = OpenWeatherConfig {
            suggestion_limit: 6,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_is_never_serialized() {
        let config = OpenWeatherConfig::for_testing("http://localhost");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("test-key"));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn test_api_key_is_redacted_in_debug() {
        let config = OpenWeatherConfig::for_testing("http://localhost");
        assert!(!format!("{config:?}").contains("test-key"));
    }
}
