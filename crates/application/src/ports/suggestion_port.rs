//! City suggestion port
//!
//! Defines the interface for autocomplete lookups while the user types.

use async_trait::async_trait;
use domain::Suggestion;
#[cfg(test)]
use mockall::automock;

use crate::error::FetchError;

/// Port for place autocomplete
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SuggestionPort: Send + Sync {
    /// Candidate places for a partial query, in provider order
    async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, FetchError>;
}
