//! Domain entities

mod suggestion;
mod weather_snapshot;

pub use suggestion::Suggestion;
pub use weather_snapshot::WeatherSnapshot;
