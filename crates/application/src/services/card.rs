//! City card view model
//!
//! Flattens a cache status, the shared clock tick and the theme into the
//! strings a card displays.

use std::fmt;

use domain::{CityName, WeatherSnapshot};
use serde::Serialize;
use tracing::warn;

use crate::services::{
    clock::ClockTick,
    local_time::LocalTimeComputer,
    presentation::{ConditionPresentationMapper, Presentation, Theme, wind_spin_speed},
    weather_cache::CacheStatus,
};

/// Shown when the local time cannot be computed
const UNKNOWN_TIME: &str = "--:--:-- --";

/// Content of a card with weather data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadyCard {
    /// Tracked city the card belongs to
    pub city: CityName,
    /// Name reported by the provider
    pub location_name: String,
    /// "Local Time: hh:mm:ss AM"
    pub local_time: String,
    pub description: String,
    /// "20°C"
    pub temperature: String,
    /// "Feels Like: 19°C"
    pub feels_like: String,
    /// "40%"
    pub humidity: String,
    /// Height of the humidity gauge fill
    pub humidity_fill: String,
    /// "3 m/s"
    pub wind: String,
    pub wind_spin: f64,
    pub presentation: Presentation,
}

impl ReadyCard {
    fn build(
        city: CityName,
        snapshot: &WeatherSnapshot,
        tick: ClockTick,
        theme: Theme,
        time: &LocalTimeComputer,
    ) -> Self {
        let local_time = time
            .at_tick(tick, snapshot.timezone_offset_seconds)
            .unwrap_or_else(|e| {
                warn!(city = %city, error = %e, "Cannot compute local time");
                UNKNOWN_TIME.to_string()
            });

        let description = if snapshot.description.is_empty() {
            "No description".to_string()
        } else {
            snapshot.description.clone()
        };

        Self {
            location_name: snapshot.location_name.clone(),
            local_time: format!("Local Time: {local_time}"),
            description,
            temperature: format!("{}°C", snapshot.temperature),
            feels_like: format!("Feels Like: {}°C", snapshot.feels_like),
            humidity: snapshot.humidity.to_string(),
            humidity_fill: snapshot.humidity.fill_height(),
            wind: format!("{} m/s", snapshot.wind_speed),
            wind_spin: wind_spin_speed(snapshot.wind_speed),
            presentation: ConditionPresentationMapper::for_snapshot(snapshot, theme),
            city,
        }
    }
}

/// What a city card shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CardView {
    Loading { city: CityName },
    Error { city: CityName, message: String },
    NoData { city: CityName },
    Ready(Box<ReadyCard>),
}

impl CardView {
    /// Build the card for a city from its cache status
    #[must_use]
    pub fn build(
        city: &CityName,
        status: &CacheStatus,
        tick: ClockTick,
        theme: Theme,
        time: &LocalTimeComputer,
    ) -> Self {
        let city = city.clone();
        match status {
            CacheStatus::Loading => Self::Loading { city },
            CacheStatus::Error { error } if error.is_no_data() => Self::NoData { city },
            CacheStatus::Error { error } => Self::Error {
                city,
                message: error.to_string(),
            },
            CacheStatus::Ready { snapshot } => {
                Self::Ready(Box::new(ReadyCard::build(city, snapshot, tick, theme, time)))
            },
        }
    }

    /// Tracked city the card belongs to
    #[must_use]
    pub fn city(&self) -> &CityName {
        match self {
            Self::Loading { city } | Self::Error { city, .. } | Self::NoData { city } => city,
            Self::Ready(card) => &card.city,
        }
    }

    /// Weather content, when available
    #[must_use]
    pub fn ready(&self) -> Option<&ReadyCard> {
        match self {
            Self::Ready(card) => Some(card),
            _ => None,
        }
    }

    /// Lines of text as they appear on the card, top to bottom
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Loading { .. } => vec!["Loading...".to_string()],
            Self::Error { message, .. } => vec![format!("Error: {message}")],
            Self::NoData { .. } => vec!["No weather data".to_string()],
            Self::Ready(card) => vec![
                card.location_name.clone(),
                card.local_time.clone(),
                format!("{} {}", card.presentation.icon.symbol(), card.description),
                card.temperature.clone(),
                card.feels_like.clone(),
                format!("{} Humidity", card.humidity),
                card.wind.clone(),
            ],
        }
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
