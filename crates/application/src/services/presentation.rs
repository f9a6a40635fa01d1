//! Condition to presentation mapping
//!
//! Maps a provider weather category and description onto the card
//! background, the icon and its animation. Light and dark variants share the
//! same structure and differ in color tokens only.

use domain::{Condition, WeatherSnapshot};
use serde::{Deserialize, Serialize};

/// Dashboard color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Theme from a dark-mode flag
    #[must_use]
    pub const fn from_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    /// Whether this is the dark theme
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Pick the light or dark token
    const fn pick(self, light: &'static str, dark: &'static str) -> &'static str {
        match self {
            Self::Light => light,
            Self::Dark => dark,
        }
    }

    /// Page background and text classes
    #[must_use]
    pub const fn page_classes(self) -> &'static str {
        self.pick("bg-gray-100 text-gray-800", "bg-gray-900 text-gray-100")
    }

    /// Label of the button that switches to the other theme
    #[must_use]
    pub const fn toggle_label(self) -> &'static str {
        self.pick("Dark Mode", "Light Mode")
    }
}

impl From<bool> for Theme {
    fn from(is_dark: bool) -> Self {
        Self::from_dark(is_dark)
    }
}

/// Icon glyphs used on cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Glyph {
    Cloud,
    CloudRain,
    Sun,
    Bolt,
    Snowflake,
    Smog,
}

impl Glyph {
    /// Icon name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::CloudRain => "cloud-rain",
            Self::Sun => "sun",
            Self::Bolt => "bolt",
            Self::Snowflake => "snowflake",
            Self::Smog => "smog",
        }
    }

    /// Single-character rendering for terminals
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Cloud => "☁",
            Self::CloudRain => "🌧",
            Self::Sun => "☀",
            Self::Bolt => "⚡",
            Self::Snowflake => "❄",
            Self::Smog => "🌫",
        }
    }
}

/// One drawn icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconLayer {
    pub glyph: Glyph,
    /// Animation class, e.g. `animate-sun-shine`
    pub animation: &'static str,
    /// Color token, e.g. `yellow-500`
    pub color: &'static str,
    /// Size class
    pub size: &'static str,
}

impl IconLayer {
    const fn new(glyph: Glyph, animation: &'static str, color: &'static str) -> Self {
        Self {
            glyph,
            animation,
            color,
            size: "text-4xl",
        }
    }

    /// Full class list
    #[must_use]
    pub fn classes(&self) -> String {
        format!("{} text-{} {}", self.animation, self.color, self.size)
    }
}

/// Icon for a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IconSpec {
    /// A single glyph
    Single { icon: IconLayer },
    /// A glyph with a second one drawn on top (thundersnow)
    Composite { base: IconLayer, overlay: IconLayer },
    /// Text instead of a glyph
    Label {
        text: &'static str,
        color: &'static str,
    },
}

impl IconSpec {
    /// Whether an overlay is drawn
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Composite { .. })
    }

    /// Base glyph, if any
    #[must_use]
    pub const fn glyph(&self) -> Option<Glyph> {
        match self {
            Self::Single { icon } => Some(icon.glyph),
            Self::Composite { base, .. } => Some(base.glyph),
            Self::Label { .. } => None,
        }
    }

    /// Terminal rendering of the icon
    #[must_use]
    pub fn symbol(&self) -> String {
        match self {
            Self::Single { icon } => icon.glyph.symbol().to_string(),
            Self::Composite { base, overlay } => {
                format!("{}{}", base.glyph.symbol(), overlay.glyph.symbol())
            },
            Self::Label { text, .. } => (*text).to_string(),
        }
    }
}

/// Everything the card needs to style itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Presentation {
    /// Canonical condition the styling was chosen for
    pub condition: Condition,
    /// Background classes
    pub background: &'static str,
    pub icon: IconSpec,
}

/// Maps weather conditions to card styling
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionPresentationMapper;

impl ConditionPresentationMapper {
    /// Styling for a provider category and description
    ///
    /// The category is matched case-insensitively. Snow whose description
    /// contains "thunder" (exact case) gets a bolt drawn over the snowflake.
    #[must_use]
    pub fn map(condition_main: &str, description: &str, theme: Theme) -> Presentation {
        let condition = Condition::parse(condition_main);
        let thundersnow = condition == Condition::Snow && description.contains("thunder");

        let icon = match condition {
            Condition::Snow if thundersnow => IconSpec::Composite {
                base: snow_icon(theme),
                overlay: IconLayer {
                    size: "text-3xl",
                    ..bolt_icon(theme)
                },
            },
            Condition::Unknown => IconSpec::Label {
                text: Condition::Unknown.as_str(),
                color: theme.pick("gray-500", "gray-400"),
            },
            other => IconSpec::Single {
                icon: single_icon(other, theme),
            },
        };

        Presentation {
            condition,
            background: background(condition, theme),
            icon,
        }
    }

    /// Styling for a fetched snapshot
    #[must_use]
    pub fn for_snapshot(snapshot: &WeatherSnapshot, theme: Theme) -> Presentation {
        Self::map(&snapshot.condition_main, &snapshot.description, theme)
    }
}

/// Spin speed of the wind indicator
///
/// Calm readings still spin at the minimum speed of 1.
#[must_use]
pub fn wind_spin_speed(wind_speed: f64) -> f64 {
    wind_speed.max(1.0)
}

const fn background(condition: Condition, theme: Theme) -> &'static str {
    match condition {
        Condition::Clouds => theme.pick(
            "bg-gradient-to-b from-gray-200 to-gray-400",
            "bg-gradient-to-b from-blue-600 to-blue-200",
        ),
        Condition::Rain => theme.pick(
            "bg-gradient-to-b from-blue-200 to-blue-400",
            "bg-gradient-to-b from-blue-800 to-blue-600",
        ),
        Condition::Clear => theme.pick(
            "bg-gradient-to-b from-yellow-100 to-orange-200",
            "bg-gradient-to-b from-yellow-900 to-orange-800",
        ),
        Condition::Thunderstorm => theme.pick(
            "bg-gradient-to-b from-gray-600 to-black",
            "bg-gradient-to-b from-gray-900 to-gray-800",
        ),
        Condition::Snow => theme.pick(
            "bg-gradient-to-b from-white to-blue-100",
            "bg-gradient-to-b from-gray-700 to-blue-800",
        ),
        Condition::Haze => theme.pick(
            "bg-gradient-to-b from-gray-300 to-gray-500 opacity-80",
            "bg-gradient-to-b from-yellow-900 to-gray-800",
        ),
        Condition::Mist => theme.pick(
            "bg-gradient-to-b from-gray-300 to-gray-500 opacity-80",
            "bg-gradient-to-b from-gray-700 to-gray-600 opacity-80",
        ),
        Condition::Drizzle => theme.pick(
            "bg-gradient-to-b from-blue-100 to-blue-300",
            "bg-gradient-to-b from-blue-700 to-blue-500",
        ),
        Condition::Unknown => theme.pick("bg-gray-100", "bg-gray-800"),
    }
}

const fn snow_icon(theme: Theme) -> IconLayer {
    IconLayer::new(Glyph::Snowflake, "animate-snow-fall", theme.pick("white", "gray-200"))
}

const fn bolt_icon(theme: Theme) -> IconLayer {
    IconLayer::new(Glyph::Bolt, "animate-lightning-flash", theme.pick("yellow-300", "yellow-200"))
}

/// Plain icon of a known condition; `Unknown` falls back to a cloud
const fn single_icon(condition: Condition, theme: Theme) -> IconLayer {
    match condition {
        Condition::Clouds | Condition::Unknown => {
            IconLayer::new(Glyph::Cloud, "animate-cloud-move", theme.pick("gray-600", "grey-100"))
        },
        Condition::Rain => {
            IconLayer::new(Glyph::CloudRain, "animate-rain-fall", theme.pick("blue-600", "blue-300"))
        },
        Condition::Clear => {
            IconLayer::new(Glyph::Sun, "animate-sun-shine", theme.pick("yellow-500", "yellow-300"))
        },
        Condition::Thunderstorm => bolt_icon(theme),
        Condition::Snow => snow_icon(theme),
        Condition::Haze | Condition::Mist => {
            IconLayer::new(Glyph::Smog, "animate-haze-drift", theme.pick("gray-400", "gray-300"))
        },
        Condition::Drizzle => {
            IconLayer::new(Glyph::CloudRain, "animate-rain-fall", theme.pick("blue-500", "blue-300"))
        },
    }
}

#[cfg(test)]
mod tests {
    use domain::Humidity;

    use super::*;

    #[test]
    fn unlisted_conditions_map_to_unknown() {
        for raw in ["Smoke", "Tornado", "", "Fog"] {
            let p = ConditionPresentationMapper::map(raw, "whatever", Theme::Dark);
            assert_eq!(p.condition, Condition::Unknown);
            assert_eq!(p.background, "bg-gray-800");
            assert_eq!(
                p.icon,
                IconSpec::Label {
                    text: "Unknown",
                    color: "gray-400"
                }
            );
        }

        let light = ConditionPresentationMapper::map("Dust", "", Theme::Light);
        assert_eq!(light.background, "bg-gray-100");
        assert_eq!(light.icon.symbol(), "Unknown");
    }

    #[test]
    fn thundersnow_gets_composite_icon() {
        let p = ConditionPresentationMapper::map("Snow", "light snow with thunder", true.into());
        match p.icon {
            IconSpec::Composite { base, overlay } => {
                assert_eq!(base.glyph, Glyph::Snowflake);
                assert_eq!(base.color, "gray-200");
                assert_eq!(overlay.glyph, Glyph::Bolt);
                assert_eq!(overlay.color, "yellow-200");
                assert_eq!(overlay.size, "text-3xl");
            },
            other => panic!("expected composite icon, got {other:?}"),
        }
    }

    #[test]
    fn plain_snow_gets_snowflake() {
        let p = ConditionPresentationMapper::map("Snow", "light snow", Theme::Dark);
        assert_eq!(p.icon.glyph(), Some(Glyph::Snowflake));
        assert!(!p.icon.is_composite());
    }

    #[test]
    fn thunder_match_is_case_sensitive() {
        let p = ConditionPresentationMapper::map("snow", "Thunder snow", Theme::Light);
        assert!(!p.icon.is_composite());

        // Category case does not matter
        let p = ConditionPresentationMapper::map("SNOW", "snow and thunder", Theme::Light);
        assert!(p.icon.is_composite());
    }

    #[test]
    fn thunder_in_other_conditions_is_ignored() {
        let p = ConditionPresentationMapper::map("Rain", "rain with thunder", Theme::Light);
        assert_eq!(p.icon.glyph(), Some(Glyph::CloudRain));
        assert!(!p.icon.is_composite());
    }

    #[test]
    fn themes_differ_only_in_tokens() {
        for condition in Condition::KNOWN {
            let light = ConditionPresentationMapper::map(condition.as_str(), "", Theme::Light);
            let dark = ConditionPresentationMapper::map(condition.as_str(), "", Theme::Dark);
            assert_eq!(light.condition, dark.condition);
            assert_eq!(light.icon.glyph(), dark.icon.glyph());
            assert_ne!(light.background, dark.background, "{condition}");
            assert!(light.background.starts_with("bg-gradient-to-b"));
        }
    }

    #[test]
    fn clear_tables() {
        let light = ConditionPresentationMapper::map("Clear", "clear sky", Theme::Light);
        assert_eq!(light.background, "bg-gradient-to-b from-yellow-100 to-orange-200");
        match light.icon {
            IconSpec::Single { icon } => {
                assert_eq!(icon.glyph, Glyph::Sun);
                assert_eq!(icon.classes(), "animate-sun-shine text-yellow-500 text-4xl");
            },
            other => panic!("expected single icon, got {other:?}"),
        }

        let dark = ConditionPresentationMapper::map("Clear", "clear sky", Theme::Dark);
        assert_eq!(dark.background, "bg-gradient-to-b from-yellow-900 to-orange-800");
    }

    #[test]
    fn haze_and_mist_share_icon() {
        let haze = ConditionPresentationMapper::map("Haze", "", Theme::Light);
        let mist = ConditionPresentationMapper::map("Mist", "", Theme::Light);
        assert_eq!(haze.icon, mist.icon);
        assert_eq!(haze.icon.glyph(), Some(Glyph::Smog));
        assert_eq!(mist.background, "bg-gradient-to-b from-gray-300 to-gray-500 opacity-80");
    }

    #[test]
    fn drizzle_and_rain_colors() {
        let rain = ConditionPresentationMapper::map("Rain", "", Theme::Light);
        let drizzle = ConditionPresentationMapper::map("Drizzle", "", Theme::Light);
        assert_eq!(rain.icon.glyph(), drizzle.icon.glyph());
        assert_ne!(rain.icon, drizzle.icon);
    }

    #[test]
    fn for_snapshot_uses_main_and_description() {
        let snapshot = WeatherSnapshot {
            condition_main: "Thunderstorm".to_string(),
            description: "thunderstorm with rain".to_string(),
            temperature: 25.0,
            feels_like: 27.0,
            humidity: Humidity::clamped(80),
            wind_speed: 6.0,
            timezone_offset_seconds: 19_800,
            location_name: "Chennai".to_string(),
        };
        let p = ConditionPresentationMapper::for_snapshot(&snapshot, Theme::Light);
        assert_eq!(p.background, "bg-gradient-to-b from-gray-600 to-black");
        assert_eq!(p.icon.glyph(), Some(Glyph::Bolt));
    }

    #[test]
    fn theme_chrome() {
        assert_eq!(Theme::Light.page_classes(), "bg-gray-100 text-gray-800");
        assert_eq!(Theme::Dark.page_classes(), "bg-gray-900 text-gray-100");
        assert_eq!(Theme::Light.toggle_label(), "Dark Mode");
        assert_eq!(Theme::Dark.toggle_label(), "Light Mode");
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn wind_spin_has_floor_of_one() {
        assert!((wind_spin_speed(0.0) - 1.0).abs() < f64::EPSILON);
        assert!((wind_spin_speed(0.4) - 1.0).abs() < f64::EPSILON);
        assert!((wind_spin_speed(3.0) - 3.0).abs() < f64::EPSILON);
    }
}
