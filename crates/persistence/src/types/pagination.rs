//! Pagination for the recipe listing.
//!
//! The unfiltered listing is page-based: a 1-based page number and a page
//! size, turned into `LIMIT`/`OFFSET`. Filtered search is not paginated and
//! is capped at [`SEARCH_RESULT_LIMIT`] rows instead.
//!
//! Both paths share the same ordering: rating descending with missing
//! ratings last, then id ascending. No cursor is issued, so rows can shift
//! between pages if the data changes between two requests.

use serde::{Deserialize, Serialize};

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Maximum number of rows returned by a filtered search.
pub const SEARCH_RESULT_LIMIT: u32 = 200;

/// `ORDER BY` clause shared by the listing and search paths.
pub const RECIPE_ORDER_BY: &str = "ORDER BY rating DESC NULLS LAST, id ASC";

/// A normalized page request.
///
/// Construction clamps the inputs, so every `PageRequest` satisfies
/// `page >= 1` and `1 <= limit <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u64,
    limit: u32,
}

impl PageRequest {
    /// Normalizes a page request against [`MAX_PAGE_SIZE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use recipebox_persistence::types::PageRequest;
    ///
    /// let request = PageRequest::new(0, 150);
    /// assert_eq!(request.page(), 1);
    /// assert_eq!(request.limit(), 100);
    /// assert_eq!(request.offset(), 0);
    /// ```
    pub fn new(page: i64, limit: i64) -> Self {
        Self::with_max_limit(page, limit, MAX_PAGE_SIZE)
    }

    /// Normalizes a page request against a custom maximum page size.
    pub fn with_max_limit(page: i64, limit: i64, max_limit: u32) -> Self {
        let max_limit = max_limit.max(1);
        Self {
            page: page.max(1) as u64,
            limit: limit.clamp(1, i64::from(max_limit)) as u32,
        }
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Returns the page size.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the number of rows to skip, `(page - 1) * limit`.
    ///
    /// Saturates instead of overflowing for absurd page numbers; such pages
    /// are simply empty.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(u64::from(self.limit))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of the unfiltered listing.
///
/// Serializes as `{ page, limit, total, data }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The 1-based page number.
    pub page: u64,
    /// The page size.
    pub limit: u32,
    /// Total number of rows in the unfiltered collection.
    pub total: u64,
    /// Rows on this page, at most `limit`.
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Creates a page for the given request.
    pub fn new(request: PageRequest, total: u64, data: Vec<T>) -> Self {
        Self {
            page: request.page(),
            limit: request.limit(),
            total,
            data,
        }
    }

    /// Returns the number of pages, never less than one.
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.limit.max(1))).max(1)
    }
}
