//! Health check endpoint handlers.
//!
//! Provides liveness and readiness endpoints for monitoring and load
//! balancers.

use axum::{Json, extract::State};
use recipebox_persistence::core::RecipeStorage;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for the liveness endpoint.
///
/// Never touches the datastore.
///
/// # HTTP Request
///
/// `GET /health`
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Handler for the readiness probe.
///
/// Runs a trivial query through the connection pool.
///
/// # HTTP Request
///
/// `GET /_readiness`
///
/// # Response
///
/// - `200 OK` - Datastore answered
/// - `503 Service Unavailable` - Datastore could not be reached
/// - `500 Internal Server Error` - Any other datastore failure
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> RestResult<Json<Value>>
where
    S: RecipeStorage + 'static,
{
    debug!("Processing readiness check request");

    state
        .storage()
        .health_check()
        .await
        .map_err(RestError::from_readiness_failure)?;

    Ok(Json(json!({
        "status": "ready",
        "backend": state.storage().backend_name(),
    })))
}
