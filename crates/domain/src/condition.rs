//! Canonical weather conditions
//!
//! The provider reports a free-form `main` category per observation
//! ("Clouds", "Rain", ...). The dashboard normalises it to capitalised form
//! and maps it onto a closed set of conditions, with everything unrecognised
//! falling into [`Condition::Unknown`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Weather condition categories the dashboard knows how to present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Clouds,
    Rain,
    Clear,
    Thunderstorm,
    Snow,
    Haze,
    Mist,
    Drizzle,
    Unknown,
}

impl Condition {
    /// All recognised conditions, excluding `Unknown`
    pub const KNOWN: [Self; 8] = [
        Self::Clouds,
        Self::Rain,
        Self::Clear,
        Self::Thunderstorm,
        Self::Snow,
        Self::Haze,
        Self::Mist,
        Self::Drizzle,
    ];

    /// Normalise a raw category: first character upper case, the rest lower case
    ///
    /// An empty input becomes `"Unknown"`.
    ///
    /// ```
    /// use domain::Condition;
    ///
    /// assert_eq!(Condition::canonicalize("tHUNDERSTORM"), "Thunderstorm");
    /// assert_eq!(Condition::canonicalize(""), "Unknown");
    /// ```
    #[must_use]
    pub fn canonicalize(raw: &str) -> String {
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => Self::Unknown.as_str().to_string(),
        }
    }

    /// Parse a raw provider category into a condition
    ///
    /// ```
    /// use domain::Condition;
    ///
    /// assert_eq!(Condition::parse("clear"), Condition::Clear);
    /// assert_eq!(Condition::parse("Tornado"), Condition::Unknown);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match Self::canonicalize(raw).as_str() {
            "Clouds" => Self::Clouds,
            "Rain" => Self::Rain,
            "Clear" => Self::Clear,
            "Thunderstorm" => Self::Thunderstorm,
            "Snow" => Self::Snow,
            "Haze" => Self::Haze,
            "Mist" => Self::Mist,
            "Drizzle" => Self::Drizzle,
            _ => Self::Unknown,
        }
    }

    /// Canonical name of the condition
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Clear => "Clear",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Haze => "Haze",
            Self::Mist => "Mist",
            Self::Drizzle => "Drizzle",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether this is a recognised condition
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
