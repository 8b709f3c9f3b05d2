//! Page-number pagination primitives shared by backend endpoints.
//!
//! Listing endpoints accept a one-based `page` and a positive `limit`, and
//! answer with the requested window plus a [`PageInfo`] block describing the
//! whole result set. The types here stay framework agnostic: the HTTP adapter
//! parses raw query strings with [`PageRequest::from_query`], the domain
//! passes the validated request to its store, and the store reports the total
//! so [`PageInfo::new`] can derive the page count.
//!
//! # Examples
//! ```
//! use pagination::{PageInfo, PageRequest};
//!
//! let request = PageRequest::new(3, 10).expect("valid window");
//! assert_eq!(request.offset(), 20);
//!
//! let info = PageInfo::new(request, 25);
//! assert_eq!(info.pages(), 3);
//! ```

use serde::{Deserialize, Serialize};

/// Page used when the caller does not supply a usable value.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller does not supply a usable value.
pub const DEFAULT_LIMIT: u32 = 10;

/// Errors raised when constructing a [`PageRequest`] from explicit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    PageOutOfRange,
    /// A page must hold at least one item.
    #[error("limit must be greater than 0")]
    LimitOutOfRange,
}

/// Validated pagination window.
///
/// ## Invariants
/// - `page >= 1`
/// - `limit >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest", into = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a request from explicit values, rejecting out-of-range input.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `page` or `limit` is zero.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange);
        }
        if limit == 0 {
            return Err(PageRequestError::LimitOutOfRange);
        }
        Ok(Self { page, limit })
    }

    /// Build a request from raw query-string values.
    ///
    /// Missing, non-numeric, zero, or negative values fall back to
    /// [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`] instead of failing.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::from_query(Some("abc"), Some("25"));
    /// assert_eq!(request.page(), 1);
    /// assert_eq!(request.limit(), 25);
    /// ```
    #[must_use]
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items in the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip before the first item of this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
}

#[derive(Serialize, Deserialize)]
struct RawPageRequest {
    page: u32,
    limit: u32,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(value.page, value.limit)
    }
}

impl From<PageRequest> for RawPageRequest {
    fn from(value: PageRequest) -> Self {
        Self {
            page: value.page,
            limit: value.limit,
        }
    }
}

/// Summary of a paginated result set.
///
/// Serialises as `{"total": .., "page": .., "limit": .., "pages": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    total: u64,
    page: u32,
    limit: u32,
    pages: u64,
}

impl PageInfo {
    /// Describe the page selected by `request` within `total` matching items.
    ///
    /// `pages` is `ceil(total / limit)`, so an empty result set has zero pages.
    #[must_use]
    pub const fn new(request: PageRequest, total: u64) -> Self {
        Self {
            total,
            page: request.page,
            limit: request.limit,
            pages: total.div_ceil(request.limit as u64),
        }
    }

    /// Total number of matching items across every page.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Page number that was requested.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size that was requested.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of pages needed to hold every matching item.
    #[must_use]
    pub const fn pages(&self) -> u64 {
        self.pages
    }
}

/// One page of items together with its [`PageInfo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginated<T> {
    items: Vec<T>,
    info: PageInfo,
}

impl<T> Paginated<T> {
    /// Pair a page of items with the result-set summary.
    #[must_use]
    pub const fn new(items: Vec<T>, info: PageInfo) -> Self {
        Self { items, info }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Result-set summary.
    #[must_use]
    pub const fn info(&self) -> PageInfo {
        self.info
    }

    /// Split into the items and the summary.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, PageInfo) {
        (self.items, self.info)
    }

    /// Convert every item while keeping the summary.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for request parsing and page arithmetic.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0, 10, PageRequestError::PageOutOfRange)]
    #[case(1, 0, PageRequestError::LimitOutOfRange)]
    fn new_rejects_zero_values(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected: PageRequestError,
    ) {
        assert_eq!(PageRequest::new(page, limit), Err(expected));
    }

    #[rstest]
    #[case(None, None, 1, 10)]
    #[case(Some("2"), Some("5"), 2, 5)]
    #[case(Some(" 3 "), Some("20"), 3, 20)]
    #[case(Some("abc"), Some("xyz"), 1, 10)]
    #[case(Some("0"), Some("0"), 1, 10)]
    #[case(Some("-4"), Some("-1"), 1, 10)]
    #[case(Some(""), Some("2.5"), 1, 10)]
    fn from_query_falls_back_to_defaults(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] expected_page: u32,
        #[case] expected_limit: u32,
    ) {
        let request = PageRequest::from_query(page, limit);
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.limit(), expected_limit);
    }

    #[rstest]
    #[case(1, 10, 0)]
    #[case(2, 10, 10)]
    #[case(3, 10, 20)]
    #[case(4, 7, 21)]
    fn offset_skips_previous_pages(#[case] page: u32, #[case] limit: u32, #[case] offset: u64) {
        let request = PageRequest::new(page, limit).expect("valid request");
        assert_eq!(request.offset(), offset);
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(25, 10, 3)]
    fn pages_round_up(#[case] total: u64, #[case] limit: u32, #[case] pages: u64) {
        let request = PageRequest::new(1, limit).expect("valid request");
        assert_eq!(PageInfo::new(request, total).pages(), pages);
    }

    #[test]
    fn page_info_serialises_flat_summary() {
        let request = PageRequest::new(3, 10).expect("valid request");
        let value = serde_json::to_value(PageInfo::new(request, 25)).expect("serialise");
        assert_eq!(
            value,
            json!({ "total": 25, "page": 3, "limit": 10, "pages": 3 })
        );
    }

    #[test]
    fn deserialising_zero_page_fails() {
        let result: Result<PageRequest, _> =
            serde_json::from_value(json!({ "page": 0, "limit": 10 }));
        assert!(result.is_err());
    }

    #[test]
    fn map_preserves_summary() {
        let info = PageInfo::new(PageRequest::default(), 2);
        let page = Paginated::new(vec![1, 2], info).map(|value| value * 10);
        assert_eq!(page.items(), &[10, 20]);
        assert_eq!(page.info(), info);
    }
}
