//! SQLite backend implementation.

use std::fmt::Debug;
use std::path::Path;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize};

use crate::error::{BackendError, StorageError, StorageResult};
use crate::nutrients::{NUMERIC_TEXT_FUNCTION, strip_to_numeric};

use super::schema;
use super::search::query_builder::CASEFOLD_FUNCTION;

pub(crate) const BACKEND_NAME: &str = "sqlite";

/// SQLite backend for recipe storage.
///
/// Holds an r2d2 pool; cloning the backend is not supported, share it
/// behind an `Arc` instead.
pub struct SqliteBackend {
    pub(crate) pool: Pool<SqliteConnectionManager>,
    config: SqliteBackendConfig,
    is_memory: bool,
}

impl Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("config", &self.config)
            .field("is_memory", &self.is_memory)
            .finish_non_exhaustive()
    }
}

/// Configuration for the SQLite backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteBackendConfig {
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of idle connections.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,

    /// Enable WAL mode for better concurrency.
    #[serde(default = "default_true")]
    pub enable_wal: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout_ms() -> u64 {
    30000
}

fn default_busy_timeout_ms() -> u32 {
    5000
}

fn default_true() -> bool {
    true
}

impl Default for SqliteBackendConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout_ms: default_connection_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
            enable_wal: true,
        }
    }
}

impl SqliteBackend {
    /// Creates a new in-memory SQLite backend.
    ///
    /// Every pooled connection to `:memory:` would open its own empty
    /// database, so the in-memory pool holds exactly one connection that is
    /// never recycled.
    pub fn in_memory() -> StorageResult<Self> {
        Self::with_config(":memory:", SqliteBackendConfig::default())
    }

    /// Opens or creates a file-based SQLite database.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Self::with_config(path, SqliteBackendConfig::default())
    }

    /// Creates a backend with custom configuration.
    pub fn with_config<P: AsRef<Path>>(
        path: P,
        config: SqliteBackendConfig,
    ) -> StorageResult<Self> {
        let is_memory = path.as_ref().to_string_lossy() == ":memory:";
        let busy_timeout = Duration::from_millis(u64::from(config.busy_timeout_ms));

        let manager = if is_memory {
            SqliteConnectionManager::memory()
        } else {
            SqliteConnectionManager::file(path.as_ref())
        }
        .with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            register_functions(conn)
        });

        let builder = Pool::builder().connection_timeout(Duration::from_millis(
            config.connection_timeout_ms,
        ));
        let builder = if is_memory {
            builder
                .max_size(1)
                .min_idle(Some(1))
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            builder
                .max_size(config.max_connections)
                .min_idle(Some(config.min_connections))
        };

        let pool = builder
            .build(manager)
            .map_err(|e| connection_failed(e.to_string()))?;

        let backend = Self {
            pool,
            config,
            is_memory,
        };

        backend.configure_connection()?;

        tracing::debug!(is_memory, "SQLite backend ready");
        Ok(backend)
    }

    /// Initialize the database schema.
    pub fn init_schema(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;
        schema::initialize_schema(&conn)
    }

    /// Get a connection from the pool.
    pub(crate) fn get_connection(
        &self,
    ) -> StorageResult<PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| connection_failed(e.to_string()))
    }

    /// Configure database-wide settings.
    fn configure_connection(&self) -> StorageResult<()> {
        if self.config.enable_wal && !self.is_memory {
            let conn = self.get_connection()?;
            // journal_mode returns the resulting mode as a row
            conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
                .map_err(|e| internal_error(format!("Failed to enable WAL mode: {}", e)))?;
        }

        Ok(())
    }

    /// Returns whether this is an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.is_memory
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &SqliteBackendConfig {
        &self.config
    }
}

/// Registers the SQL functions the query builder relies on.
///
/// `nutrient_digits(value)` applies [`strip_to_numeric`] to text and to the
/// text form of numbers, and passes NULL (and blobs) through as NULL.
///
/// `casefold(value)` lowercases text with Unicode case mapping; SQLite's
/// built-in `lower()` leaves non-ASCII letters unchanged. Non-text values
/// give NULL.
pub(crate) fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        CASEFOLD_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let folded = match ctx.get_raw(0) {
                ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).to_lowercase()),
                _ => None,
            };
            Ok(folded)
        },
    )?;

    conn.create_scalar_function(
        NUMERIC_TEXT_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let stripped = match ctx.get_raw(0) {
                ValueRef::Text(bytes) => Some(strip_to_numeric(&String::from_utf8_lossy(bytes))),
                ValueRef::Integer(i) => Some(strip_to_numeric(&i.to_string())),
                ValueRef::Real(f) => Some(strip_to_numeric(&f.to_string())),
                ValueRef::Null | ValueRef::Blob(_) => None,
            };
            Ok(stripped)
        },
    )
}

pub(crate) fn connection_failed(message: String) -> StorageError {
    StorageError::Backend(BackendError::ConnectionFailed {
        backend_name: BACKEND_NAME.to_string(),
        message,
    })
}

pub(crate) fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: BACKEND_NAME.to_string(),
        message,
        source: None,
    })
}

pub(crate) fn query_error(context: &str, err: rusqlite::Error) -> StorageError {
    StorageError::Backend(BackendError::QueryError {
        message: format!("{}: {}", context, err),
    })
}
