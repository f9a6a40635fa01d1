//! Domain layer for the weather dashboard
//!
//! Contains the core vocabulary of the dashboard: tracked cities, weather
//! snapshots, place suggestions and the canonical weather conditions.
//! This layer performs no I/O.

pub mod condition;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use condition::Condition;
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
