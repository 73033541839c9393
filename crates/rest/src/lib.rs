//! # recipebox-rest - Recipe Browse and Filter API
//!
//! This crate serves a recipe collection over HTTP: a paginated listing
//! sorted by rating and a filtered search over title, cuisine, rating, total
//! time and calories.
//!
//! ## Backend Support
//!
//! Storage backends are configured through feature flags:
//!
//! - `sqlite` - SQLite backend (default)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use recipebox_rest::{create_app, ServerConfig};
//! use recipebox_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Create a storage backend
//!     let backend = SqliteBackend::open("recipes.db")?;
//!     backend.init_schema()?;
//!
//!     // Create the Axum application
//!     let app = create_app(backend);
//!
//!     // Start the server
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3001").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | HTTP Method | Response |
//! |----------|-------------|----------|
//! | `/api/recipes?page=&limit=` | GET | `{ page, limit, total, data }` |
//! | `/api/recipes/search?title=&cuisine=&rating=&total_time=&calories=` | GET | `{ data }` |
//! | `/health` | GET | `{ ok: true }` |
//! | `/_readiness` | GET | `{ status, backend }` |
//!
//! ## Filters
//!
//! `rating`, `total_time` and `calories` accept an optional operator
//! (`<`, `>`, `<=`, `>=`, `=`) immediately followed by a number, e.g.
//! `rating=>=4.5` or `calories=<=400`. Values that do not match are ignored,
//! never rejected.
//!
//! ## Error Handling
//!
//! Errors are returned as `{ "error": { "code", "message" } }`:
//!
//! | HTTP Status | Code | Description |
//! |-------------|------|-------------|
//! | 400 | bad_request | Undecodable query string |
//! | 500 | internal | Datastore failure |
//! | 503 | unavailable | Datastore unreachable (`/_readiness` only) |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and JSON error bodies
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Axum extractors for pagination and search filters
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use recipebox_persistence::core::RecipeStorage;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: RecipeStorage + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use recipebox_rest::{create_app_with_config, ServerConfig};
/// use recipebox_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// let config = ServerConfig {
///     port: 3000,
///     enable_cors: true,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: RecipeStorage + 'static,
{
    create_app_with_shared_storage(Arc::new(storage), config)
}

/// Creates the Axum application around storage that is already shared.
pub fn create_app_with_shared_storage<S>(storage: Arc<S>, config: ServerConfig) -> Router
where
    S: RecipeStorage + 'static,
{
    info!(
        backend = storage.backend_name(),
        "Creating Recipebox API server"
    );

    // Create application state
    let state = AppState::new(storage, config.clone());

    // Build the router with all routes
    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    // Apply remaining middleware
    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
///
/// The API is read-only, so only `GET` is allowed.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    if config.cors_origins == "*" {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` overrides
/// the given level.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "recipebox={level},recipebox_rest={level},recipebox_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
