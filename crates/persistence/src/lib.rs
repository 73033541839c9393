//! Recipebox Persistence Layer
//!
//! This crate stores recipes and answers the two read queries the API
//! serves: a paginated listing and a filtered search. Both return rows
//! ordered by rating descending (missing ratings last), then by id.
//!
//! # Backend Features
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! # Architecture
//!
//! - [`types`] - Recipes, search filters and pagination
//! - [`nutrients`] - Calorie extraction from free-text nutrient values
//! - [`error`] - Error types for all operations
//! - [`core`] - The [`RecipeStorage`] trait
//! - [`backends`] - Backend implementations
//! - [`import`] - Loading recipe documents from JSON files
//!
//! # Filters
//!
//! Numeric filters use a small operator grammar. Anything that does not
//! match it is dropped rather than rejected:
//!
//! ```
//! use recipebox_persistence::types::{CompareOp, Comparison};
//!
//! let rating = Comparison::parse(Some(">=4.5")).unwrap();
//! assert_eq!(rating.op, CompareOp::Ge);
//! assert_eq!(rating.value, 4.5);
//!
//! // Bare numbers mean equality
//! assert_eq!(Comparison::parse(Some("30")).unwrap().op, CompareOp::Eq);
//!
//! // Malformed input is absent, not an error
//! assert!(Comparison::parse(Some("=>4")).is_none());
//! assert!(Comparison::parse(Some("abc")).is_none());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod import;
pub mod nutrients;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{NewRecipe, Page, PageRequest, Recipe, RecipeFilters};

// Re-export core traits
pub use core::RecipeStorage;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
