//! Application state for the Recipebox API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the storage backend and the server configuration.

use std::sync::Arc;

use recipebox_persistence::core::RecipeStorage;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`RecipeStorage`])
///
/// # Example
///
/// ```rust,ignore
/// use recipebox_rest::{AppState, ServerConfig};
/// use recipebox_persistence::backends::sqlite::SqliteBackend;
/// use std::sync::Arc;
///
/// let backend = SqliteBackend::in_memory()?;
/// let config = ServerConfig::default();
/// let state = AppState::new(Arc::new(backend), config);
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: RecipeStorage> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the listing page size used when a request gives none.
    pub fn default_page_size(&self) -> u32 {
        self.config.default_page_size
    }

    /// Returns the maximum listing page size.
    pub fn max_page_size(&self) -> u32 {
        self.config.max_page_size
    }

    /// Returns the maximum number of recipes a search returns.
    pub fn search_limit(&self) -> u32 {
        self.config.search_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use recipebox_persistence::error::StorageResult;
    use recipebox_persistence::types::{NewRecipe, Page, PageRequest, Recipe, RecipeFilters};

    // Mock storage for testing
    struct MockStorage;

    #[async_trait]
    impl RecipeStorage for MockStorage {
        fn backend_name(&self) -> &'static str {
            "mock"
        }

        async fn count(&self) -> StorageResult<u64> {
            Ok(0)
        }

        async fn list_page(&self, request: PageRequest) -> StorageResult<Page<Recipe>> {
            Ok(Page::new(request, 0, Vec::new()))
        }

        async fn search(
            &self,
            _filters: &RecipeFilters,
            _limit: u32,
        ) -> StorageResult<Vec<Recipe>> {
            Ok(Vec::new())
        }

        async fn insert(&self, _recipe: NewRecipe) -> StorageResult<Recipe> {
            unimplemented!()
        }

        async fn import(&self, _recipes: Vec<NewRecipe>) -> StorageResult<usize> {
            unimplemented!()
        }

        async fn health_check(&self) -> StorageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_app_state_creation() {
        let storage = Arc::new(MockStorage);
        let config = ServerConfig::default();
        let state = AppState::new(storage, config);

        assert_eq!(state.storage().backend_name(), "mock");
        assert_eq!(state.default_page_size(), 10);
    }

    #[test]
    fn test_app_state_config_access() {
        let storage = Arc::new(MockStorage);
        let config = ServerConfig {
            default_page_size: 25,
            max_page_size: 50,
            search_limit: 75,
            ..Default::default()
        };
        let state = AppState::new(storage, config);

        assert_eq!(state.default_page_size(), 25);
        assert_eq!(state.max_page_size(), 50);
        assert_eq!(state.search_limit(), 75);
    }

    #[test]
    fn test_app_state_clone() {
        let storage = Arc::new(MockStorage);
        let config = ServerConfig::default();
        let state = AppState::new(storage, config);
        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.storage, &cloned.storage));
    }
}
