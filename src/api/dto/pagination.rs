//! Pagination query parameters and page metadata.
//!
//! Pagination never fails: malformed inputs fall back to defaults and a page
//! past the end resolves to the last page.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, PickFirst, serde_as};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MAX_PER_PAGE: u64 = 100;

/// Pagination query parameters.
///
/// Values are accepted as numbers or numeric strings; anything unparseable is
/// treated as absent.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub per_page: Option<i64>,
}

impl PaginationParams {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self { page, per_page }
    }

    /// Requested page, floored at 1. Defaults to 1.
    pub fn page(&self) -> u64 {
        self.page
            .map_or(DEFAULT_PAGE, |p| p.max(1).unsigned_abs())
    }

    /// Requested page size, clamped to `[1, MAX_PER_PAGE]`. Defaults to 10.
    pub fn per_page(&self) -> u64 {
        self.per_page.map_or(DEFAULT_PER_PAGE, |p| {
            p.clamp(1, MAX_PER_PAGE as i64).unsigned_abs()
        })
    }
}

/// Descriptive metadata for one page of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub per_page: u64,
}

impl PageInfo {
    /// Computes page metadata for a collection of `total_count` items.
    ///
    /// An empty collection still has one (empty) page. A requested page past
    /// the end is clamped to the last page.
    pub fn new(total_count: u64, params: &PaginationParams) -> Self {
        let per_page = params.per_page();
        let total_pages = total_count.div_ceil(per_page).max(1);
        let current_page = params.page().min(total_pages);

        Self {
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
            current_page,
            total_pages,
            total_count,
            per_page,
        }
    }

    /// Zero-based index of the first item on the current page.
    pub fn offset(&self) -> u64 {
        (self.current_page - 1) * self.per_page
    }
}

/// A page of items with its metadata.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

/// Slices an in-memory collection into the requested page.
pub fn paginate<'a, T>(items: &'a [T], params: &PaginationParams) -> (&'a [T], PageInfo) {
    let page_info = PageInfo::new(items.len() as u64, params);
    let start = usize::try_from(page_info.offset())
        .unwrap_or(usize::MAX)
        .min(items.len());
    let end = start
        .saturating_add(page_info.per_page as usize)
        .min(items.len());

    (&items[start..end], page_info)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<i64>, per_page: Option<i64>) -> PaginationParams {
        PaginationParams::new(page, per_page)
    }

    #[test]
    fn test_defaults() {
        let info = PageInfo::new(35, &params(None, None));
        assert_eq!(info.current_page, 1);
        assert_eq!(info.per_page, 10);
        assert_eq!(info.total_pages, 4);
        assert_eq!(info.total_count, 35);
        assert!(info.has_next_page);
        assert!(!info.has_previous_page);
        assert_eq!(info.offset(), 0);
    }

    #[test]
    fn test_middle_page() {
        let info = PageInfo::new(35, &params(Some(2), Some(10)));
        assert_eq!(info.current_page, 2);
        assert!(info.has_next_page);
        assert!(info.has_previous_page);
        assert_eq!(info.offset(), 10);
    }

    #[test]
    fn test_page_floored_at_one() {
        assert_eq!(params(Some(0), None).page(), 1);
        assert_eq!(params(Some(-7), None).page(), 1);
        assert_eq!(params(Some(i64::MIN), None).page(), 1);
    }

    #[test]
    fn test_per_page_clamped() {
        assert_eq!(params(None, Some(0)).per_page(), 1);
        assert_eq!(params(None, Some(-3)).per_page(), 1);
        assert_eq!(params(None, Some(101)).per_page(), 100);
        assert_eq!(params(None, Some(i64::MAX)).per_page(), 100);
        assert_eq!(params(None, Some(25)).per_page(), 25);
    }

    #[test]
    fn test_page_past_end_returns_last_page() {
        let info = PageInfo::new(35, &params(Some(99), Some(10)));
        assert_eq!(info.current_page, 4);
        assert!(!info.has_next_page);
        assert!(info.has_previous_page);
        assert_eq!(info.offset(), 30);
    }

    #[test]
    fn test_empty_collection_has_single_page() {
        let info = PageInfo::new(0, &params(Some(5), None));
        assert_eq!(info.total_pages, 1);
        assert_eq!(info.current_page, 1);
        assert!(!info.has_next_page);
        assert!(!info.has_previous_page);
    }

    #[test]
    fn test_bounds_hold_for_arbitrary_inputs() {
        let inputs = [i64::MIN, -100, -1, 0, 1, 2, 3, 50, 100, 101, 10_000, i64::MAX];
        for total in [0u64, 1, 9, 10, 11, 250] {
            for &page in &inputs {
                for &per_page in &inputs {
                    let info = PageInfo::new(total, &params(Some(page), Some(per_page)));
                    assert!((1..=info.total_pages).contains(&info.current_page));
                    assert!((1..=MAX_PER_PAGE).contains(&info.per_page));
                }
            }
        }
    }

    #[test]
    fn test_paginate_slice() {
        let items: Vec<u32> = (1..=23).collect();

        let (page, info) = paginate(&items, &params(Some(3), Some(10)));
        assert_eq!(page, &[21, 22, 23]);
        assert_eq!(info.total_pages, 3);

        let (page, _) = paginate(&items, &params(Some(1), Some(5)));
        assert_eq!(page, &[1, 2, 3, 4, 5]);

        let empty: Vec<u32> = Vec::new();
        let (page, info) = paginate(&empty, &params(None, None));
        assert!(page.is_empty());
        assert_eq!(info.current_page, 1);
    }

    #[test]
    fn test_query_string_parsing_is_lenient() {
        let p: PaginationParams = serde_json::from_str(r#"{"page": "abc", "per_page": "25"}"#).unwrap();
        assert_eq!(p.page, None);
        assert_eq!(p.per_page, Some(25));

        let p: PaginationParams = serde_json::from_str(r#"{"page": 3, "per_page": "2.5"}"#).unwrap();
        assert_eq!(p.page(), 3);
        assert_eq!(p.per_page(), DEFAULT_PER_PAGE);

        let p: PaginationParams = serde_json::from_str("{}").unwrap();
        assert_eq!(p.page(), DEFAULT_PAGE);
        assert_eq!(p.per_page(), DEFAULT_PER_PAGE);
    }
}
