//! SQLite search implementation.
//!
//! Translates recipe filters and page requests into parameterized SQL.

pub mod query_builder;

pub use query_builder::{QueryBuilder, RECIPE_COLUMNS, SqlFragment, SqlParam, calories_expression};
