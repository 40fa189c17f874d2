//! Page-based listing on top of the API's offset/limit parameters
//!
//! The list endpoints return a bare array without a total count, so
//! [`Page::total`] is an estimate: a short page is the last one, a full page
//! means at least one more item exists.

use serde::{Deserialize, Serialize};

/// Page size used when none is chosen.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page sizes offered to users.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [5, 10, 20, 50];

/// Parameters of a list call.
///
/// Zero values count as unset, as does a blank search term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    /// Free-text filter
    pub search: Option<String>,
}

impl ListParams {
    /// Empty parameters: the server's default listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request `page` with `limit` items per page.
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            search: None,
        }
    }

    /// Set the search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn effective_page(&self) -> Option<u32> {
        self.page.filter(|&p| p > 0)
    }

    fn effective_limit(&self) -> Option<u32> {
        self.limit.filter(|&l| l > 0)
    }

    /// Number of items skipped, when both page and limit are set.
    pub fn offset(&self) -> Option<u64> {
        let page = self.effective_page()?;
        let limit = self.effective_limit()?;
        Some(u64::from(page - 1) * u64::from(limit))
    }

    /// Query string pairs in the order the API expects.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(offset) = self.offset() {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(limit) = self.effective_limit() {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search.as_deref()
            && !search.trim().is_empty()
        {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// 1-based page number
    pub page: u32,
    /// Requested page size, if any
    pub limit: Option<u32>,
    /// Estimated total item count
    pub total: u64,
}

impl<T> Page<T> {
    /// Wrap the items returned for `params`.
    pub fn new(items: Vec<T>, params: &ListParams) -> Self {
        let page = params.effective_page().unwrap_or(1);
        let limit = params.effective_limit();
        let total = estimate_total(items.len(), page, limit);
        Self {
            items,
            page,
            limit,
            total,
        }
    }

    /// Whether another page probably exists.
    pub fn has_more(&self) -> bool {
        match self.limit {
            Some(limit) => self.total > u64::from(self.page) * u64::from(limit),
            None => false,
        }
    }

    /// Number of pages implied by [`total`](Self::total).
    pub fn total_pages(&self) -> u64 {
        match self.limit {
            Some(limit) => self.total.div_ceil(u64::from(limit)),
            None => u64::from(!self.items.is_empty()),
        }
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform the items, keeping the paging information.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

pub(crate) fn estimate_total(len: usize, page: u32, limit: Option<u32>) -> u64 {
    let len = len as u64;
    match limit {
        Some(limit) if len < u64::from(limit) => u64::from(page - 1) * u64::from(limit) + len,
        Some(limit) => u64::from(page) * u64::from(limit) + 1,
        None => len,
    }
}

/// Current page and page size of a paginated view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
    initial_page: u32,
    initial_page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Start at `page` with `page_size` items per page.
    ///
    /// Zero values are raised to 1.
    pub fn new(page: u32, page_size: u32) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        Self {
            page,
            page_size,
            initial_page: page,
            initial_page_size: page_size,
        }
    }

    /// Current page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Current page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Jump to `page`.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Change the page size and go back to page 1.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Set page and page size together.
    pub fn set(&mut self, page: u32, page_size: u32) {
        self.page = page.max(1);
        self.page_size = page_size.max(1);
    }

    /// Advance one page.
    pub fn next(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Go back one page, stopping at page 1.
    pub fn previous(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Return to the initial page and page size.
    pub fn reset(&mut self) {
        self.page = self.initial_page;
        self.page_size = self.initial_page_size;
    }

    /// List parameters for the current position.
    pub fn params(&self, search: Option<&str>) -> ListParams {
        ListParams {
            page: Some(self.page),
            limit: Some(self.page_size),
            search: search.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(ListParams::new(), vec![])]
    #[case(ListParams::page(1, 10), vec![("offset", "0"), ("limit", "10")])]
    #[case(ListParams::page(3, 20), vec![("offset", "40"), ("limit", "20")])]
    #[case(ListParams::new().limit(5), vec![("limit", "5")])]
    #[case(ListParams { page: Some(2), ..Default::default() }, vec![])]
    #[case(ListParams::page(0, 10), vec![("limit", "10")])]
    #[case(ListParams::page(2, 0), vec![])]
    #[case(ListParams::page(2, 5).search("volvo"), vec![("offset", "5"), ("limit", "5"), ("search", "volvo")])]
    #[case(ListParams::new().search("   "), vec![])]
    fn test_query_pairs(#[case] params: ListParams, #[case] expected: Vec<(&str, &str)>) {
        let pairs = params.query_pairs();
        let pairs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_short_page_is_last() {
        let page = Page::new(vec![1, 2, 3], &ListParams::page(3, 10));
        assert_eq!(page.total, 23);
        assert!(!page.has_more());
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_full_page_implies_more() {
        let page = Page::new(vec![0; 10], &ListParams::page(2, 10));
        assert_eq!(page.total, 21);
        assert!(page.has_more());
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_unpaged_listing() {
        let page = Page::new(vec!["a", "b"], &ListParams::new());
        assert_eq!(page.page, 1);
        assert_eq!(page.total, 2);
        assert!(!page.has_more());
        assert_eq!(page.total_pages(), 1);

        let empty: Page<u8> = Page::new(vec![], &ListParams::new());
        assert_eq!(empty.total_pages(), 0);
    }

    #[test]
    fn test_page_map_keeps_position() {
        let page = Page::new(vec![1, 2], &ListParams::page(4, 2)).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.page, 4);
        assert_eq!(page.total, 9);
    }

    #[test]
    fn test_pagination_state() {
        let mut pagination = Pagination::default();
        assert_eq!((pagination.page(), pagination.page_size()), (1, DEFAULT_PAGE_SIZE));

        pagination.next();
        pagination.next();
        assert_eq!(pagination.page(), 3);

        pagination.set_page_size(20);
        assert_eq!((pagination.page(), pagination.page_size()), (1, 20));

        pagination.previous();
        assert_eq!(pagination.page(), 1);

        pagination.set(4, 50);
        assert_eq!(
            pagination.params(Some("bike")),
            ListParams::page(4, 50).search("bike")
        );

        pagination.reset();
        assert_eq!(pagination, Pagination::default());
    }

    #[test]
    fn test_pagination_custom_start() {
        let mut pagination = Pagination::new(2, 5);
        pagination.set_page(7);
        pagination.reset();
        assert_eq!((pagination.page(), pagination.page_size()), (2, 5));
    }
}
