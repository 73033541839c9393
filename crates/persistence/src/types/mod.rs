//! Core types for the persistence layer.
//!
//! - [`Recipe`], [`NewRecipe`] - Stored and to-be-inserted recipes
//! - [`Comparison`], [`CompareOp`], [`RecipeFilters`] - Search filters
//! - [`PageRequest`], [`Page`] - Pagination for the unfiltered listing
//!
//! # Examples
//!
//! ```
//! use recipebox_persistence::types::{CompareOp, PageRequest, RecipeFilters};
//!
//! let filters = RecipeFilters::from_raw(None, Some("Thai"), Some(">=4.5"), None, Some("junk"));
//! assert_eq!(filters.rating.unwrap().op, CompareOp::Ge);
//! assert!(filters.calories.is_none());
//!
//! let page = PageRequest::new(3, 20);
//! assert_eq!(page.offset(), 40);
//! ```

mod filter;
mod pagination;
mod recipe;

pub use filter::{CompareOp, Comparison, RecipeFilters};
pub use pagination::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest, RECIPE_ORDER_BY, SEARCH_RESULT_LIMIT,
};
pub use recipe::{NewRecipe, Recipe, to_nullable_number};
