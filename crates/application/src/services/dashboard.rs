//! Dashboard controller
//!
//! Owns the state the user sees: the tracked cities in display order, the
//! text being typed, the suggestions for it and the theme. It drives the
//! per-city weather cache and the shared clock, and renders one card per
//! tracked city.

use std::{fmt, sync::Arc, time::Duration};

use domain::{CityName, Suggestion};
use parking_lot::Mutex;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{SuggestionPort, WeatherPort},
    services::{
        card::CardView,
        clock::{Clock, ClockTick, DEFAULT_TICK_INTERVAL},
        local_time::LocalTimeComputer,
        presentation::Theme,
        weather_cache::{DEFAULT_CACHE_TTL, PerCityWeatherCache},
    },
};

/// Cities tracked when the dashboard starts
pub const DEFAULT_CITIES: [&str; 5] = ["Bengaluru", "Rawalpindi", "Delhi", "Los Angeles", "Chennai"];

/// Default minimum input length before suggestions are fetched
pub const DEFAULT_MIN_QUERY_CHARS: usize = 3;

/// Default maximum number of suggestions shown
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Tunables of the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub default_cities: Vec<String>,
    pub cache_ttl: Duration,
    pub tick_interval: Duration,
    pub min_query_chars: usize,
    pub max_suggestions: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            default_cities: DEFAULT_CITIES.iter().map(ToString::to_string).collect(),
            cache_ttl: DEFAULT_CACHE_TTL,
            tick_interval: DEFAULT_TICK_INTERVAL,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

#[derive(Debug, Default)]
struct DashboardState {
    cities: Vec<CityName>,
    input: String,
    suggestions: Vec<Suggestion>,
    theme: Theme,
}

/// Controller behind the dashboard view
pub struct DashboardController {
    state: Arc<Mutex<DashboardState>>,
    cache: PerCityWeatherCache,
    suggester: Arc<dyn SuggestionPort>,
    clock: Clock,
    time: LocalTimeComputer,
    settings: DashboardSettings,
}

impl fmt::Debug for DashboardController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardController")
            .field("state", &*self.state.lock())
            .field("cache", &self.cache)
            .field("clock", &self.clock)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl DashboardController {
    /// Create the controller, start the clock and fetch the default cities
    ///
    /// Default city names that are blank or repeated are skipped. Must be
    /// called from within a Tokio runtime.
    pub fn new(
        weather: Arc<dyn WeatherPort>,
        suggester: Arc<dyn SuggestionPort>,
        settings: DashboardSettings,
    ) -> Self {
        let mut cities: Vec<CityName> = Vec::with_capacity(settings.default_cities.len());
        for name in &settings.default_cities {
            match CityName::new(name.as_str()) {
                Ok(city) if !cities.contains(&city) => cities.push(city),
                Ok(city) => warn!(city = %city, "Skipping repeated default city"),
                Err(e) => warn!(error = %e, "Skipping invalid default city"),
            }
        }

        info!(cities = cities.len(), "Starting dashboard");

        let controller = Self {
            state: Arc::new(Mutex::new(DashboardState {
                cities,
                ..DashboardState::default()
            })),
            cache: PerCityWeatherCache::new(weather, settings.cache_ttl),
            suggester,
            clock: Clock::start(settings.tick_interval),
            time: LocalTimeComputer::local(),
            settings,
        };
        for city in controller.cities() {
            let _ = controller.cache.get(&city);
        }
        controller
    }

    /// Use a fixed viewer timezone for local times
    #[must_use]
    pub fn with_time_computer(mut self, time: LocalTimeComputer) -> Self {
        self.time = time;
        self
    }

    /// Tracked cities in display order
    #[must_use]
    pub fn cities(&self) -> Vec<CityName> {
        self.state.lock().cities.clone()
    }

    /// Current input text
    #[must_use]
    pub fn input(&self) -> String {
        self.state.lock().input.clone()
    }

    /// Current suggestions, in provider order
    #[must_use]
    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.state.lock().suggestions.clone()
    }

    /// Current theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.state.lock().theme
    }

    /// The weather cache backing the cards
    #[must_use]
    pub const fn cache(&self) -> &PerCityWeatherCache {
        &self.cache
    }

    /// Latest shared clock tick
    #[must_use]
    pub fn now(&self) -> ClockTick {
        self.clock.now()
    }

    /// Receiver notified on every clock tick
    #[must_use]
    pub fn subscribe_ticks(&self) -> watch::Receiver<ClockTick> {
        self.clock.subscribe()
    }

    /// Track a city
    ///
    /// Blank and already tracked names are ignored. On success the input
    /// and suggestions are cleared and the city's weather is requested.
    /// Returns whether the city was added.
    #[instrument(skip(self))]
    pub fn add_city(&self, name: &str) -> bool {
        let Ok(city) = CityName::new(name) else {
            debug!("Ignoring blank city name");
            return false;
        };

        {
            let mut state = self.state.lock();
            if state.cities.contains(&city) {
                debug!(city = %city, "City already tracked");
                return false;
            }
            state.cities.push(city.clone());
            state.input.clear();
            state.suggestions.clear();
        }

        info!(city = %city, "City added");
        let _ = self.cache.get(&city);
        true
    }

    /// Track the city currently typed in the input
    pub fn add_from_input(&self) -> bool {
        let input = self.input();
        self.add_city(&input)
    }

    /// Track the suggestion at `index`
    pub fn select_suggestion(&self, index: usize) -> bool {
        let selected = self.state.lock().suggestions.get(index).map(|s| s.name.clone());
        selected.is_some_and(|name| self.add_city(&name))
    }

    /// Stop tracking a city; absent names are ignored
    ///
    /// Returns whether the city was removed.
    #[instrument(skip(self))]
    pub fn remove_city(&self, name: &str) -> bool {
        let Ok(city) = CityName::new(name) else {
            return false;
        };

        let removed = {
            let mut state = self.state.lock();
            let before = state.cities.len();
            state.cities.retain(|c| c != &city);
            state.cities.len() != before
        };

        if removed {
            self.cache.remove(&city);
            info!("City removed");
        }
        removed
    }

    /// Store new input text and update suggestions
    ///
    /// Long enough input starts a suggestion lookup and returns its handle.
    /// Its result is applied only if the input has not changed meanwhile.
    /// Shorter input clears the suggestions immediately.
    pub fn on_input_change(&self, text: impl Into<String>) -> Option<JoinHandle<()>> {
        let text = text.into();
        let long_enough = text.chars().count() >= self.settings.min_query_chars;

        {
            let mut state = self.state.lock();
            state.input.clone_from(&text);
            if !long_enough {
                state.suggestions.clear();
                return None;
            }
        }

        let state = Arc::clone(&self.state);
        let suggester = Arc::clone(&self.suggester);
        let max = self.settings.max_suggestions;

        Some(tokio::spawn(async move {
            debug!(query = %text, "Fetching suggestions");
            match suggester.suggest(&text).await {
                Ok(mut suggestions) => {
                    suggestions.truncate(max);
                    let mut state = state.lock();
                    if state.input == text {
                        state.suggestions = suggestions;
                    } else {
                        debug!(query = %text, "Discarding suggestions for stale input");
                    }
                },
                Err(e) => {
                    warn!(query = %text, error = %e, "Suggestion lookup failed");
                },
            }
        }))
    }

    /// Flip between light and dark theme; returns the new theme
    pub fn toggle_theme(&self) -> Theme {
        let mut state = self.state.lock();
        state.theme = state.theme.toggled();
        state.theme
    }

    /// Refetch stale snapshots of tracked cities
    ///
    /// Meant for a periodic timer. Fresh snapshots and fetches in flight are
    /// left alone, and failed cities are not retried. Returns the number of
    /// fetches started.
    pub fn refresh(&self) -> usize {
        self.cities()
            .iter()
            .filter(|city| self.cache.refresh_stale(city))
            .count()
    }

    /// Cards for all tracked cities at the current tick, without fetching
    #[must_use]
    pub fn render(&self) -> Vec<CardView> {
        let tick = self.clock.now();
        let (cities, theme) = {
            let state = self.state.lock();
            (state.cities.clone(), state.theme)
        };

        cities
            .iter()
            .map(|city| CardView::build(city, &self.cache.peek(city), tick, theme, &self.time))
            .collect()
    }

    /// Fetch (or reuse) weather for any city and build its card
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if the name is blank.
    pub async fn card(&self, name: &str) -> Result<CardView, ApplicationError> {
        let city = CityName::new(name)?;
        let status = self.cache.resolve(&city).await;
        Ok(CardView::build(&city, &status, self.clock.now(), self.theme(), &self.time))
    }

    /// Stop the clock
    pub fn shutdown(&self) {
        self.clock.stop();
    }

    /// Whether the clock is still ticking
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::FixedOffset;
    use domain::{Humidity, WeatherSnapshot};
    use tokio::sync::Notify;

    use super::*;
    use crate::{error::FetchError, ports::MockSuggestionPort};

    struct StaticWeather {
        calls: AtomicUsize,
    }

    impl StaticWeather {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl WeatherPort for StaticWeather {
        async fn fetch_weather(&self, city: &CityName) -> Result<WeatherSnapshot, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if city.as_str() == "Atlantis" {
                return Err(FetchError::Upstream("city not found".to_string()));
            }
            Ok(WeatherSnapshot {
                condition_main: "Clear".to_string(),
                description: "clear sky".to_string(),
                temperature: 20.0,
                feels_like: 19.0,
                humidity: Humidity::clamped(40),
                wind_speed: 3.0,
                timezone_offset_seconds: 3600,
                location_name: city.to_string(),
            })
        }
    }

    /// Suggester that answers with places named after the query once released
    struct GatedSuggester {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl SuggestionPort for GatedSuggester {
        async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
            self.gate.notified().await;
            Ok(vec![Suggestion::new(format!("{query}is"), "FR")])
        }
    }

    fn no_defaults() -> DashboardSettings {
        DashboardSettings {
            default_cities: Vec::new(),
            ..DashboardSettings::default()
        }
    }

    fn controller_with(suggester: Arc<dyn SuggestionPort>, settings: DashboardSettings) -> DashboardController {
        DashboardController::new(StaticWeather::new(), suggester, settings)
            .with_time_computer(LocalTimeComputer::for_viewer(FixedOffset::east_opt(0).unwrap()))
    }

    fn controller() -> DashboardController {
        controller_with(Arc::new(MockSuggestionPort::new()), no_defaults())
    }

    fn names(controller: &DashboardController) -> Vec<String> {
        controller.cities().into_iter().map(CityName::into_inner).collect()
    }

    #[tokio::test]
    async fn starts_with_default_cities_in_order() {
        let c = controller_with(Arc::new(MockSuggestionPort::new()), DashboardSettings::default());
        assert_eq!(
            names(&c),
            vec!["Bengaluru", "Rawalpindi", "Delhi", "Los Angeles", "Chennai"]
        );
        assert_eq!(c.theme(), Theme::Light);
        assert!(c.is_running());
    }

    #[tokio::test]
    async fn invalid_and_repeated_defaults_are_skipped() {
        let settings = DashboardSettings {
            default_cities: vec!["Delhi".into(), "  ".into(), "Delhi".into(), "Chennai".into()],
            ..DashboardSettings::default()
        };
        let c = controller_with(Arc::new(MockSuggestionPort::new()), settings);
        assert_eq!(names(&c), vec!["Delhi", "Chennai"]);
    }

    #[tokio::test]
    async fn add_city_appends_and_clears_input() {
        let c = controller();
        let _ = c.on_input_change("Pa");
        assert!(c.add_city("Paris"));
        assert!(c.add_city("Lima"));

        assert_eq!(names(&c), vec!["Paris", "Lima"]);
        assert_eq!(c.input(), "");
        assert!(c.suggestions().is_empty());
    }

    #[tokio::test]
    async fn adding_tracked_or_blank_city_is_noop() {
        let c = controller();
        assert!(c.add_city("Paris"));
        let _ = c.on_input_change("Pa");

        assert!(!c.add_city("Paris"));
        assert!(!c.add_city(""));
        assert!(!c.add_city("   "));

        assert_eq!(names(&c), vec!["Paris"]);
        // Rejected adds leave the input alone
        assert_eq!(c.input(), "Pa");
    }

    #[tokio::test]
    async fn remove_city_is_idempotent() {
        let c = controller();
        c.add_city("Paris");
        c.add_city("Lima");

        assert!(!c.remove_city("Tokyo"));
        assert_eq!(names(&c), vec!["Paris", "Lima"]);

        assert!(c.remove_city("Paris"));
        assert!(!c.remove_city("Paris"));
        assert_eq!(names(&c), vec!["Lima"]);
    }

    #[tokio::test]
    async fn add_from_input_uses_typed_text() {
        let c = controller();
        assert!(c.on_input_change("Li").is_none());
        assert!(c.add_from_input());
        assert_eq!(names(&c), vec!["Li"]);

        // Empty input adds nothing
        assert!(!c.add_from_input());
    }

    #[tokio::test]
    async fn short_input_clears_suggestions_synchronously() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest()
            .times(1)
            .returning(|_| Ok(vec![Suggestion::new("Paris", "FR")]));
        let c = controller_with(Arc::new(mock), no_defaults());

        c.on_input_change("Par").unwrap().await.unwrap();
        assert_eq!(c.suggestions().len(), 1);

        assert!(c.on_input_change("Pa").is_none());
        assert!(c.suggestions().is_empty());
        assert_eq!(c.input(), "Pa");
    }

    #[tokio::test]
    async fn suggestions_keep_order_and_are_capped() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest()
            .withf(|q| q == "San")
            .returning(|_| {
                Ok(["San Jose", "San Diego", "Santiago", "Santander", "San Remo", "Sanaa", "Sanya"]
                    .into_iter()
                    .map(|n| Suggestion::new(n, "XX"))
                    .collect())
            });
        let c = controller_with(Arc::new(mock), no_defaults());

        c.on_input_change("San").unwrap().await.unwrap();
        let got: Vec<_> = c.suggestions().into_iter().map(|s| s.name).collect();
        assert_eq!(got, vec!["San Jose", "San Diego", "Santiago", "Santander", "San Remo"]);
    }

    #[tokio::test]
    async fn late_response_for_stale_query_is_discarded() {
        let gate = Arc::new(Notify::new());
        let c = controller_with(
            Arc::new(GatedSuggester { gate: gate.clone() }),
            no_defaults(),
        );

        let pending = c.on_input_change("Par").unwrap();
        tokio::task::yield_now().await;

        // User deletes a character before the response arrives
        assert!(c.on_input_change("Pa").is_none());

        gate.notify_one();
        pending.await.unwrap();

        assert!(c.suggestions().is_empty());
        assert_eq!(c.input(), "Pa");
    }

    #[tokio::test]
    async fn only_response_for_current_query_is_applied() {
        let gate = Arc::new(Notify::new());
        let c = controller_with(
            Arc::new(GatedSuggester { gate: gate.clone() }),
            no_defaults(),
        );

        let first = c.on_input_change("Par").unwrap();
        let second = c.on_input_change("Pari").unwrap();
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        gate.notify_waiters();
        first.await.unwrap();
        second.await.unwrap();

        let got: Vec<_> = c.suggestions().into_iter().map(|s| s.name).collect();
        assert_eq!(got, vec!["Pariis"]);
    }

    #[tokio::test]
    async fn failed_lookup_keeps_previous_suggestions() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest()
            .withf(|q| q == "Par")
            .returning(|_| Ok(vec![Suggestion::new("Paris", "FR")]));
        mock.expect_suggest()
            .withf(|q| q == "Parx")
            .returning(|_| Err(FetchError::Transport("Network Error".to_string())));
        let c = controller_with(Arc::new(mock), no_defaults());

        c.on_input_change("Par").unwrap().await.unwrap();
        c.on_input_change("Parx").unwrap().await.unwrap();

        assert_eq!(c.suggestions(), vec![Suggestion::new("Paris", "FR")]);
    }

    #[tokio::test]
    async fn select_suggestion_adds_its_name() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest().returning(|_| {
            Ok(vec![Suggestion::new("Paris", "FR"), Suggestion::new("Paris", "US")])
        });
        let c = controller_with(Arc::new(mock), no_defaults());

        c.on_input_change("Par").unwrap().await.unwrap();
        assert!(c.select_suggestion(1));
        assert_eq!(names(&c), vec!["Paris"]);
        assert!(c.suggestions().is_empty());

        assert!(!c.select_suggestion(0));
    }

    #[tokio::test]
    async fn toggle_theme_flips() {
        let c = controller();
        assert_eq!(c.toggle_theme(), Theme::Dark);
        assert_eq!(c.theme(), Theme::Dark);
        assert_eq!(c.toggle_theme(), Theme::Light);
    }

    #[tokio::test]
    async fn render_shows_one_card_per_city() {
        let c = controller();
        c.add_city("Paris");
        c.add_city("Atlantis");

        let cards = c.render();
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|card| matches!(card, CardView::Loading { .. })));

        let _ = c.cache().resolve(&CityName::new("Paris").unwrap()).await;
        let _ = c.cache().resolve(&CityName::new("Atlantis").unwrap()).await;

        let cards = c.render();
        assert_eq!(cards[0].city().as_str(), "Paris");
        assert_eq!(cards[0].ready().unwrap().location_name, "Paris");
        assert_eq!(cards[1].to_string(), "Error: city not found");
    }

    #[tokio::test]
    async fn cards_follow_theme() {
        let c = controller();
        c.add_city("Paris");
        let _ = c.cache().resolve(&CityName::new("Paris").unwrap()).await;

        c.toggle_theme();
        let cards = c.render();
        assert_eq!(
            cards[0].ready().unwrap().presentation.background,
            "bg-gradient-to-b from-yellow-900 to-orange-800"
        );
    }

    #[tokio::test]
    async fn card_for_untracked_city() {
        let c = controller();
        let card = c.card("Paris").await.unwrap();
        assert_eq!(card.ready().unwrap().temperature, "20°C");
        assert!(c.cities().is_empty());

        assert!(matches!(c.card("  ").await, Err(ApplicationError::Domain(_))));
    }

    #[tokio::test]
    async fn repeated_renders_reuse_cache() {
        let weather = StaticWeather::new();
        let c = DashboardController::new(weather.clone(), Arc::new(MockSuggestionPort::new()), no_defaults());
        c.add_city("Paris");
        let _ = c.card("Paris").await.unwrap();
        c.refresh();
        let _ = c.render();
        let _ = c.card("Paris").await.unwrap();

        assert_eq!(weather.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_does_not_retry_failed_cities() {
        let weather = StaticWeather::new();
        let c = DashboardController::new(weather.clone(), Arc::new(MockSuggestionPort::new()), no_defaults());
        c.add_city("Paris");
        c.add_city("Atlantis");
        assert!(c.card("Paris").await.unwrap().ready().is_some());
        assert!(matches!(c.card("Atlantis").await.unwrap(), CardView::Error { .. }));
        assert_eq!(weather.calls.load(Ordering::SeqCst), 2);

        tokio::time::advance(Duration::from_secs(301)).await;

        // Only the stale snapshot is refetched
        assert_eq!(c.refresh(), 1);
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(weather.calls.load(Ordering::SeqCst), 3);
        assert!(matches!(c.render()[1], CardView::Error { .. }));
    }

    #[tokio::test]
    async fn shutdown_stops_clock() {
        let c = controller();
        c.shutdown();
        tokio::task::yield_now().await;
        assert!(!c.is_running());
    }
}
