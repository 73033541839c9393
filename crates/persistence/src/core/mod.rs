//! Core storage traits and abstractions.
//!
//! - [`RecipeStorage`] - Listing, search, insert and import of recipes
//!
//! Backends live in [`crate::backends`].

mod storage;

pub use storage::RecipeStorage;
