//! Recipe listing and search handlers.

use axum::{Json, extract::State};
use recipebox_persistence::core::RecipeStorage;
use recipebox_persistence::types::{Page, Recipe};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{Pagination, SearchParams};
use crate::state::AppState;

/// Body of a search response.
///
/// Search results are capped rather than paginated, so there is no
/// `total`, `page` or `limit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching recipes, best rated first.
    pub data: Vec<Recipe>,
}

/// Handler for the paginated recipe listing.
///
/// # HTTP Request
///
/// `GET /api/recipes?page=<int>&limit=<int>`
///
/// # Response
///
/// - `200 OK` - `{ page, limit, total, data }`, ordered by rating descending
///   (unrated last), then id
/// - `500 Internal Server Error` - Datastore failure, including an
///   unreachable datastore
pub async fn list_handler<S>(
    State(state): State<AppState<S>>,
    pagination: Pagination,
) -> RestResult<Json<Page<Recipe>>>
where
    S: RecipeStorage + 'static,
{
    let request = pagination.request();
    debug!(
        page = request.page(),
        limit = request.limit(),
        "Processing recipe list request"
    );

    let page = state.storage().list_page(request).await?;
    Ok(Json(page))
}

/// Handler for filtered recipe search.
///
/// # HTTP Request
///
/// `GET /api/recipes/search?title=&cuisine=&rating=&total_time=&calories=`
///
/// `rating`, `total_time` and `calories` take an optional operator
/// (`<`, `>`, `<=`, `>=`, `=`) followed by a number. Malformed values are
/// ignored.
///
/// # Response
///
/// - `200 OK` - `{ data }` with at most the configured search limit of rows
/// - `500 Internal Server Error` - Datastore failure, including an
///   unreachable datastore
pub async fn search_handler<S>(
    State(state): State<AppState<S>>,
    params: SearchParams,
) -> RestResult<Json<SearchResponse>>
where
    S: RecipeStorage + 'static,
{
    let filters = params.into_filters();
    debug!(
        active_filters = filters.active_count(),
        "Processing recipe search request"
    );

    let data = state
        .storage()
        .search(&filters, state.search_limit())
        .await?;

    Ok(Json(SearchResponse { data }))
}
