//! Pagination extractor.
//!
//! Extracts `page` and `limit` for the recipe listing.

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use recipebox_persistence::core::RecipeStorage;
use recipebox_persistence::types::PageRequest;

use crate::error::RestError;
use crate::state::AppState;

/// Axum extractor for listing pagination.
///
/// `page` and `limit` are read leniently: an absent or non-integer value
/// falls back to the default (page 1, the configured page size). Integers are
/// then clamped by [`PageRequest`], so `page=0` becomes 1 and `limit=150`
/// becomes the configured maximum. Malformed values never reject the request.
///
/// # Example
///
/// ```rust,ignore
/// use recipebox_rest::extractors::Pagination;
///
/// async fn list_handler(pagination: Pagination) {
///     let request = pagination.request();
///     println!("page {} of size {}", request.page(), request.limit());
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    request: PageRequest,
}

impl Pagination {
    /// Builds pagination from raw query values.
    pub fn from_raw(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: u32,
        max_limit: u32,
    ) -> Self {
        let page = parse_integer(page).unwrap_or(1);
        let limit = parse_integer(limit).unwrap_or(i64::from(default_limit));

        Self {
            request: PageRequest::with_max_limit(page, limit, max_limit),
        }
    }

    /// Returns the normalized page request.
    pub fn request(&self) -> PageRequest {
        self.request
    }
}

fn parse_integer(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
}

impl<S> FromRequestParts<AppState<S>> for Pagination
where
    S: RecipeStorage + 'static,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: e.body_text(),
            })?;

        Ok(Pagination::from_raw(
            params.get("page").map(String::as_str),
            params.get("limit").map(String::as_str),
            state.default_page_size(),
            state.max_page_size(),
        ))
    }
}
