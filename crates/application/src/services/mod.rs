//! Application services - Use case implementations

mod card;
mod chart;
mod clock;
mod dashboard;
mod local_time;
mod presentation;
mod weather_cache;

pub use card::{CardView, ReadyCard};
pub use chart::{AxisOptions, CHART_LABELS, ChartData, ChartOptions, Dataset, Scales, TemperatureChart};
pub use clock::{Clock, ClockTick, DEFAULT_TICK_INTERVAL};
pub use dashboard::{
    DEFAULT_CITIES, DEFAULT_MAX_SUGGESTIONS, DEFAULT_MIN_QUERY_CHARS, DashboardController,
    DashboardSettings,
};
pub use local_time::LocalTimeComputer;
pub use presentation::{
    ConditionPresentationMapper, Glyph, IconLayer, IconSpec, Presentation, Theme, wind_spin_speed,
};
pub use weather_cache::{CacheStatus, DEFAULT_CACHE_TTL, PerCityWeatherCache};
