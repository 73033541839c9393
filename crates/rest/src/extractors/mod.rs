//! Axum extractors for recipe queries.
//!
//! - [`Pagination`] - Extract `page`/`limit` for the listing
//! - [`SearchParams`] - Extract and parse search filters

mod pagination;
mod search_params;

pub use pagination::Pagination;
pub use search_params::SearchParams;
