//! Page-number pagination utilities.
//!
//! The public API paginates with `page`/`limit` query parameters. Parameters
//! are clamped rather than rejected: page is at least 1, limit is clamped to
//! the per-endpoint cap.

use serde::{Deserialize, Serialize};

/// Default page size for listing endpoints.
pub const DEFAULT_LIMIT: i64 = 20;
/// Maximum page size on public endpoints.
pub const MAX_PUBLIC_LIMIT: i64 = 50;
/// Maximum page size on admin listing endpoints.
pub const MAX_ADMIN_LIMIT: i64 = 100;

/// Clamped pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    /// Builds clamped parameters from raw query values.
    ///
    /// `page` defaults to 1 and is floored at 1; `limit` defaults to
    /// [`DEFAULT_LIMIT`] and is clamped to `1..=max_limit`.
    pub fn clamp(page: Option<i64>, limit: Option<i64>, max_limit: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, max_limit),
        }
    }

    /// Row offset for the current page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// A page of results with the metadata the client renders pagers from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    /// Assembles a page envelope; `total_pages = ceil(total / limit)`.
    pub fn new(items: Vec<T>, total: i64, params: PageParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            limit: params.limit,
            total_pages: total_pages(total, params.limit),
        }
    }
}

/// Number of pages needed for `total` rows at `limit` rows per page.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_defaults() {
        let params = PageParams::clamp(None, None, MAX_PUBLIC_LIMIT);
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, DEFAULT_LIMIT);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_clamp_floors_page_at_one() {
        let params = PageParams::clamp(Some(0), Some(10), MAX_PUBLIC_LIMIT);
        assert_eq!(params.page, 1);

        let params = PageParams::clamp(Some(-5), Some(10), MAX_PUBLIC_LIMIT);
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_clamp_caps_limit() {
        let params = PageParams::clamp(Some(1), Some(500), MAX_PUBLIC_LIMIT);
        assert_eq!(params.limit, 50);

        let params = PageParams::clamp(Some(1), Some(500), MAX_ADMIN_LIMIT);
        assert_eq!(params.limit, 100);

        let params = PageParams::clamp(Some(1), Some(0), MAX_PUBLIC_LIMIT);
        assert_eq!(params.limit, 1);
    }

    #[test]
    fn test_offset() {
        let params = PageParams::clamp(Some(3), Some(10), MAX_PUBLIC_LIMIT);
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn test_total_pages_ceiling() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(100, 7), 15);
    }

    #[test]
    fn test_paginated_envelope() {
        let params = PageParams::clamp(Some(2), Some(10), MAX_PUBLIC_LIMIT);
        let page = Paginated::new(vec![1, 2, 3], 23, params);

        assert_eq!(page.total, 23);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 10);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_paginated_beyond_last_page_keeps_total() {
        let params = PageParams::clamp(Some(99), Some(10), MAX_PUBLIC_LIMIT);
        let page: Paginated<i32> = Paginated::new(vec![], 23, params);

        assert!(page.items.is_empty());
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages, 3);
    }
}
