//! Search parameters extractor.
//!
//! Turns the recipe search query string into [`RecipeFilters`].

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use recipebox_persistence::types::{Comparison, RecipeFilters};
use tracing::debug;

use crate::error::RestError;

/// Query parameters that hold an operator filter (`>=4.5`, `<=30`, `400`).
const COMPARISON_PARAMS: [&str; 3] = ["rating", "total_time", "calories"];

/// Axum extractor for recipe search filters.
///
/// Recognized parameters are `title`, `cuisine`, `rating`, `total_time` and
/// `calories`; anything else is ignored. Empty values and comparison values
/// that do not match the operator grammar produce no filter.
///
/// # Example
///
/// ```rust,ignore
/// use recipebox_rest::extractors::SearchParams;
///
/// async fn search_handler(params: SearchParams) {
///     let filters = params.filters();
///     println!("{} active filters", filters.active_count());
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    filters: RecipeFilters,
}

impl SearchParams {
    /// Builds search filters from raw query parameters.
    pub fn from_map(params: &HashMap<String, String>) -> Self {
        let get = |name: &str| params.get(name).map(String::as_str);

        for name in COMPARISON_PARAMS {
            if let Some(raw) = get(name)
                && !raw.is_empty()
                && Comparison::parse(Some(raw)).is_none()
            {
                debug!(param = name, value = raw, "Ignoring malformed filter value");
            }
        }

        Self {
            filters: RecipeFilters::from_raw(
                get("title"),
                get("cuisine"),
                get("rating"),
                get("total_time"),
                get("calories"),
            ),
        }
    }

    /// Returns the parsed filters.
    pub fn filters(&self) -> &RecipeFilters {
        &self.filters
    }

    /// Consumes the extractor, returning the parsed filters.
    pub fn into_filters(self) -> RecipeFilters {
        self.filters
    }
}

impl<S> FromRequestParts<S> for SearchParams
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: e.body_text(),
            })?;

        Ok(SearchParams::from_map(&params))
    }
}
