//! HTTP request handlers

pub mod health;
pub mod suggestions;
pub mod weather;
