//! Dashboard client configuration.

use std::time::Duration;

use application::{
    DEFAULT_CITIES, DEFAULT_MAX_SUGGESTIONS, DEFAULT_MIN_QUERY_CHARS, DashboardSettings,
};
use serde::{Deserialize, Serialize};

/// Dashboard client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the weather proxy
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,

    /// Cities tracked on startup
    #[serde(default = "default_cities")]
    pub default_cities: Vec<String>,

    /// How long a fetched snapshot is served from cache
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Clock tick interval in milliseconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,

    /// Input length at which suggestions are fetched
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Maximum suggestions shown
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Timeout for proxy requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_proxy_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_cities() -> Vec<String> {
    DEFAULT_CITIES.iter().map(ToString::to_string).collect()
}

const fn default_cache_ttl() -> u64 {
    300
}

const fn default_tick_interval() -> u64 {
    1000
}

const fn default_min_query_chars() -> usize {
    DEFAULT_MIN_QUERY_CHARS
}

const fn default_max_suggestions() -> usize {
    DEFAULT_MAX_SUGGESTIONS
}

const fn default_request_timeout() -> u64 {
    10
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            proxy_url: default_proxy_url(),
            default_cities: default_cities(),
            cache_ttl_secs: default_cache_ttl(),
            tick_interval_ms: default_tick_interval(),
            min_query_chars: default_min_query_chars(),
            max_suggestions: default_max_suggestions(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl DashboardConfig {
    /// Controller settings derived from this configuration
    #[must_use]
    pub fn settings(&self) -> DashboardSettings {
        DashboardSettings {
            default_cities: self.default_cities.clone(),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            min_query_chars: self.min_query_chars,
            max_suggestions: self.max_suggestions,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.proxy_url.starts_with("http://") && !self.proxy_url.starts_with("https://") {
            return Err(format!(
                "dashboard.proxy_url must be an http(s) URL, got '{}'",
                self.proxy_url
            ));
        }
        if self.cache_ttl_secs == 0 {
            return Err("dashboard.cache_ttl_secs must be greater than 0".to_string());
        }
        if self.tick_interval_ms == 0 {
            return Err("dashboard.tick_interval_ms must be greater than 0".to_string());
        }
        if self.min_query_chars == 0 {
            return Err("dashboard.min_query_chars must be at least 1".to_string());
        }
        if self.max_suggestions == 0 {
            return Err("dashboard.max_suggestions must be at least 1".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("dashboard.request_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard() {
        let config = DashboardConfig::default();
        assert_eq!(
            config.default_cities,
            vec!["Bengaluru", "Rawalpindi", "Delhi", "Los Angeles", "Chennai"]
        );
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.min_query_chars, 3);
        assert_eq!(config.max_suggestions, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn settings_conversion() {
        let config = DashboardConfig {
            cache_ttl_secs: 60,
            tick_interval_ms: 250,
            default_cities: vec!["Paris".to_string()],
            ..DashboardConfig::default()
        };
        let settings = config.settings();
        assert_eq!(settings.cache_ttl, Duration::from_secs(60));
        assert_eq!(settings.tick_interval, Duration::from_millis(250));
        assert_eq!(settings.default_cities, vec!["Paris"]);
        assert_eq!(settings.max_suggestions, 5);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad = [
            DashboardConfig {
                proxy_url: "localhost:3000".to_string(),
                ..DashboardConfig::default()
            },
            DashboardConfig {
                tick_interval_ms: 0,
                ..DashboardConfig::default()
            },
            DashboardConfig {
                max_suggestions: 0,
                ..DashboardConfig::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn validate_rejects_zero_cache_ttl() {
        let config = DashboardConfig {
            cache_ttl_secs: 0,
            ..DashboardConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("cache_ttl_secs"), "{err}");
    }

    #[test]
    fn deserialize_partial() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"default_cities": ["Lima"]}"#).unwrap();
        assert_eq!(config.default_cities, vec!["Lima"]);
        assert_eq!(config.proxy_url, "http://127.0.0.1:3000");
    }
}
