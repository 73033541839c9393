//! Recipe route configuration.
//!
//! Defines all routes for the Recipebox API.

use axum::{Router, routing::get};
use recipebox_persistence::core::RecipeStorage;

use crate::handlers;
use crate::state::AppState;

/// Creates all Recipebox API routes.
///
/// # Routes
///
/// ## Recipes
/// - `GET /api/recipes` - Paginated listing
/// - `GET /api/recipes/search` - Filtered search
///
/// ## System
/// - `GET /health` - Liveness
/// - `GET /_readiness` - Readiness (queries the datastore)
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: RecipeStorage + 'static,
{
    Router::new()
        // System routes
        .route("/health", get(handlers::health_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        // Recipe routes
        .route("/api/recipes", get(handlers::list_handler::<S>))
        .route("/api/recipes/search", get(handlers::search_handler::<S>))
        // State
        .with_state(state)
}
