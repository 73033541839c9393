//! Recipebox server
//!
//! Serves a recipe collection over HTTP, optionally importing a JSON file of
//! recipes at startup.

use clap::Parser;
use recipebox_rest::{ServerConfig, create_app_with_config, init_logging};
use tracing::info;

#[cfg(feature = "sqlite")]
use recipebox_persistence::{
    backends::sqlite::SqliteBackend, core::RecipeStorage, import::load_recipes_file,
};

/// Creates and initializes a SQLite backend from the server configuration.
#[cfg(feature = "sqlite")]
fn create_sqlite_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    info!(database = %config.database_url, "Initializing SQLite backend");

    let backend = if config.is_memory_database() {
        SqliteBackend::in_memory()?
    } else {
        SqliteBackend::open(&config.database_url)?
    };
    backend.init_schema()?;

    Ok(backend)
}

/// Loads the configured import file, if any, into the backend.
#[cfg(feature = "sqlite")]
async fn import_recipes(backend: &SqliteBackend, config: &ServerConfig) -> anyhow::Result<()> {
    let Some(path) = config.import_file.as_deref() else {
        return Ok(());
    };

    let recipes = load_recipes_file(path)?;
    let imported = backend.import(recipes).await?;
    let total = backend.count().await?;
    info!(file = %path, imported, total, "Imported recipes");

    Ok(())
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        database = %config.database_url,
        "Starting Recipebox server"
    );

    start_sqlite(config).await
}

/// Starts the server with the SQLite backend.
#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig) -> anyhow::Result<()> {
    let backend = create_sqlite_backend(&config)?;
    import_recipes(&backend, &config).await?;
    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}

/// Fallback when sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn start_sqlite(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p recipebox --features sqlite"
    )
}
