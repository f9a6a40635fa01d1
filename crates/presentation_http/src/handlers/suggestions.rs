//! City suggestions from the geocoding API

use axum::{
    Json,
    extract::{Query, State},
};
use domain::Suggestion;
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Query string of `/api/suggestions`
#[derive(Debug, Default, Deserialize)]
pub struct SuggestionQuery {
    pub q: Option<String>,
}

/// Places matching the query, in provider order
#[instrument(skip(state))]
pub async fn suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<Vec<Suggestion>>, ApiError> {
    let q = query.q.unwrap_or_default();
    let q = q.trim();
    if q.is_empty() {
        return Err(ApiError::BadRequest("Missing q parameter".to_string()));
    }

    let places = state
        .suggestions
        .suggest(q)
        .await
        .inspect_err(|e| warn!(query = %q, error = %e, "Suggestion lookup failed"))?;

    Ok(Json(places))
}
