//! API response envelope types
//!
//! Pagination query parameters and the list-response `meta` block shared
//! by every collection endpoint.

use serde::{Deserialize, Serialize};

/// Default page size for collection endpoints
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Pagination query parameters (`?page=&limit=`)
///
/// Both fields are optional on the wire; [`PageQuery::page`] and
/// [`PageQuery::limit`] resolve the defaults (page 1, limit 10).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Build from already-parsed query fields
    pub fn from_parts(page: Option<u64>, limit: Option<u64>) -> Self {
        Self { page, limit }
    }

    /// Resolved page number (1-based, minimum 1)
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Resolved page size (minimum 1)
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1)
    }

    /// Number of records to skip
    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}

/// List-response pagination metadata
///
/// ```json
/// { "total": 42, "page": 1, "limit": 10, "totalPages": 5 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PageMeta {
    /// Build the meta block; `total_pages = ceil(total / limit)`
    pub fn new(total: u64, query: &PageQuery) -> Self {
        let limit = query.limit();
        Self {
            total,
            page: query.page(),
            limit,
            total_pages: total.div_ceil(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_page_1_limit_10() {
        let q = PageQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 10);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn total_pages_is_ceiling() {
        let q = PageQuery::new(1, 10);
        assert_eq!(PageMeta::new(0, &q).total_pages, 0);
        assert_eq!(PageMeta::new(10, &q).total_pages, 1);
        assert_eq!(PageMeta::new(11, &q).total_pages, 2);
        assert_eq!(PageMeta::new(101, &q).total_pages, 11);
    }

    #[test]
    fn offset_follows_page() {
        let q = PageQuery::new(3, 20);
        assert_eq!(q.offset(), 40);
    }
}
