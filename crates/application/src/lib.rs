//! Application layer - Use cases and orchestration
//!
//! Contains the dashboard state machine, the per-city weather cache, the
//! presentation mapping and the port definitions implemented by the
//! infrastructure layer.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, FetchError};
pub use ports::*;
pub use services::*;
