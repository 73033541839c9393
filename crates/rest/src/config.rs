//! Server configuration for the Recipebox API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `REST_SERVER_PORT` | 3001 | Server port |
//! | `REST_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `REST_LOG_LEVEL` | info | Log level |
//! | `REST_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `REST_ENABLE_CORS` | true | Enable CORS |
//! | `REST_CORS_ORIGINS` | * | Allowed origins |
//! | `REST_DATABASE_URL` | recipes.db | SQLite database path, or `:memory:` |
//! | `REST_DEFAULT_PAGE_SIZE` | 10 | Listing page size when `limit` is absent |
//! | `REST_MAX_PAGE_SIZE` | 100 | Largest listing page size |
//! | `REST_SEARCH_LIMIT` | 200 | Maximum rows returned by a search |
//! | `REST_IMPORT_FILE` | (none) | JSON file of recipes to import at startup |
//!
//! # Example
//!
//! ```rust
//! use recipebox_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     enable_cors: true,
//!     ..Default::default()
//! };
//! ```

use clap::Parser;
use recipebox_persistence::types::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SEARCH_RESULT_LIMIT};

/// Server configuration for the Recipebox API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "recipebox")]
#[command(about = "Recipe browse and filter API")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "REST_SERVER_PORT", default_value = "3001")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "REST_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "REST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "REST_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "REST_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "REST_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// SQLite database path, or `:memory:` for an in-memory database.
    #[arg(long, env = "REST_DATABASE_URL", default_value = "recipes.db")]
    pub database_url: String,

    /// Listing page size when the request gives none.
    #[arg(long, env = "REST_DEFAULT_PAGE_SIZE", default_value = "10")]
    pub default_page_size: u32,

    /// Maximum listing page size.
    #[arg(long, env = "REST_MAX_PAGE_SIZE", default_value = "100")]
    pub max_page_size: u32,

    /// Maximum number of recipes returned by a search.
    #[arg(long, env = "REST_SEARCH_LIMIT", default_value = "200")]
    pub search_limit: u32,

    /// JSON file of recipes to import before serving.
    #[arg(long, env = "REST_IMPORT_FILE")]
    pub import_file: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            database_url: "recipes.db".to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            search_limit: SEARCH_RESULT_LIMIT,
            import_file: None,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse_from(["recipebox"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns whether the database lives in memory.
    pub fn is_memory_database(&self) -> bool {
        self.database_url == ":memory:"
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.database_url.trim().is_empty() {
            errors.push("Database URL cannot be empty".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if self.search_limit == 0 {
            errors.push("Search limit cannot be 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0, an in-memory database, and disables
    /// features that might interfere with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            database_url: ":memory:".to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            search_limit: SEARCH_RESULT_LIMIT,
            import_file: None,
        }
    }
}
