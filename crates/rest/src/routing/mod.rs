//! Route configuration for the Recipebox API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod recipe_routes;

pub use recipe_routes::create_routes;
