//! Current weather passthrough

use axum::{
    Json,
    extract::{Query, State},
};
use domain::CityName;
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Query string of `/api/weather`
#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

/// Current weather for a city, forwarded from the provider unchanged
#[instrument(skip(state))]
pub async fn current_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let city = CityName::new(query.city.unwrap_or_default())?;

    let body = state
        .openweather
        .current_weather_raw(city.as_str())
        .await
        .inspect_err(|e| warn!(city = %city, error = %e, "Weather lookup failed"))?;

    Ok(Json(body))
}
