//! SQLite backend implementation.
//!
//! Supports in-memory databases (used by the tests) and file-based
//! databases. Calorie filtering relies on the `nutrient_digits` SQL function,
//! which is registered on every pooled connection.
//!
//! # Example
//!
//! ```no_run
//! use recipebox_persistence::backends::sqlite::SqliteBackend;
//! use recipebox_persistence::core::RecipeStorage;
//! use recipebox_persistence::types::{NewRecipe, RecipeFilters};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! backend
//!     .insert(NewRecipe::new("Pad Thai").with_cuisine("Thai").with_rating(4.6))
//!     .await?;
//!
//! let filters = RecipeFilters::from_raw(None, None, Some(">=4.5"), None, None);
//! let found = backend.search(&filters, 200).await?;
//! assert_eq!(found.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE recipes (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     title TEXT NOT NULL,
//!     cuisine TEXT,
//!     rating REAL,
//!     prep_time INTEGER,
//!     cook_time INTEGER,
//!     total_time INTEGER,
//!     description TEXT,
//!     nutrients TEXT,  -- JSON object
//!     serves TEXT
//! );
//!
//! CREATE INDEX idx_recipes_rating ON recipes(rating DESC, id);
//! CREATE INDEX idx_recipes_cuisine ON recipes(cuisine);
//! ```

mod backend;
mod schema;
pub mod search;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use schema::SCHEMA_VERSION;
pub use search::{QueryBuilder, SqlFragment, SqlParam};
