//! Core recipe storage trait.
//!
//! This module defines the [`RecipeStorage`] trait, the only way the rest of
//! the system talks to the datastore. Implementations receive structured
//! filters and page requests, never raw query text.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{NewRecipe, Page, PageRequest, Recipe, RecipeFilters};

/// Storage operations for recipes.
///
/// Every read returns rows ordered by rating descending (missing ratings
/// last), then id ascending.
///
/// # Example
///
/// ```ignore
/// use recipebox_persistence::core::RecipeStorage;
/// use recipebox_persistence::types::{PageRequest, RecipeFilters};
///
/// async fn example<S: RecipeStorage>(storage: &S) -> Result<(), StorageError> {
///     let first = storage.list_page(PageRequest::new(1, 10)).await?;
///     println!("{} recipes over {} pages", first.total, first.total_pages());
///
///     let filters = RecipeFilters::from_raw(None, Some("Thai"), Some(">=4.5"), None, None);
///     let top_thai = storage.search(&filters, 200).await?;
///     assert!(top_thai.len() <= 200);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait RecipeStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Counts all recipes.
    async fn count(&self) -> StorageResult<u64>;

    /// Returns one page of the unfiltered listing together with the total
    /// row count.
    async fn list_page(&self, request: PageRequest) -> StorageResult<Page<Recipe>>;

    /// Returns at most `limit` recipes matching every active filter.
    ///
    /// An empty filter set matches every recipe.
    async fn search(&self, filters: &RecipeFilters, limit: u32) -> StorageResult<Vec<Recipe>>;

    /// Inserts a single recipe and returns it with its assigned id.
    async fn insert(&self, recipe: NewRecipe) -> StorageResult<Recipe>;

    /// Inserts many recipes atomically; either all are stored or none.
    ///
    /// Returns the number of recipes inserted.
    async fn import(&self, recipes: Vec<NewRecipe>) -> StorageResult<usize>;

    /// Checks that the datastore answers queries.
    async fn health_check(&self) -> StorageResult<()>;
}
