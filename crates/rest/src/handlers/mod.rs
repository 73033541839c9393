//! HTTP request handlers.
//!
//! - [`recipes`] - Recipe listing and search
//! - [`health`] - Liveness and readiness endpoints

pub mod health;
pub mod recipes;

// Re-export handlers for convenience
pub use health::{health_handler, readiness_handler};
pub use recipes::{SearchResponse, list_handler, search_handler};
