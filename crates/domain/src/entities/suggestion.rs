//! Place suggestion entity
//!
//! Candidate place returned by the geocoding service while the user types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Autocomplete candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Place name, used as the city name when selected
    pub name: String,
    /// ISO country code
    pub country: String,
    /// Region or state, when the provider reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Suggestion {
    /// Create a suggestion without a region
    #[must_use]
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            state: None,
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}
