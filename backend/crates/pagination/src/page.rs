//! `PageRequest` and its validation rules.

use std::ops::Range;

/// Page number used when a request omits `page`.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when a request omits `limit`.
pub const DEFAULT_LIMIT: u64 = 10;

/// Errors raised while building or applying a [`PageRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// `page` was below one.
    #[error("page must be at least 1, got {page}")]
    InvalidPage {
        /// Rejected page value.
        page: i64,
    },
    /// `limit` was below one.
    #[error("limit must be at least 1, got {limit}")]
    InvalidLimit {
        /// Rejected limit value.
        limit: i64,
    },
    /// The requested page starts past the end of the sequence.
    #[error("page {page} with limit {limit} is beyond the {total} available items")]
    OutOfRange {
        /// Requested page.
        page: u64,
        /// Requested limit.
        limit: u64,
        /// Number of items available.
        total: usize,
    },
}

/// One-based page number plus page size.
///
/// Neither value has an upper bound; offsets saturate instead of overflowing.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let page = PageRequest::new(3, 20).expect("valid page");
/// assert_eq!(page.offset(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a page request, rejecting values below one.
    ///
    /// # Errors
    /// Returns [`PageError::InvalidPage`] or [`PageError::InvalidLimit`] when
    /// either value is zero or negative.
    pub fn new(page: i64, limit: i64) -> Result<Self, PageError> {
        let page_value = u64::try_from(page)
            .ok()
            .filter(|value| *value >= 1)
            .ok_or(PageError::InvalidPage { page })?;
        let limit_value = u64::try_from(limit)
            .ok()
            .filter(|value| *value >= 1)
            .ok_or(PageError::InvalidLimit { limit })?;
        Ok(Self {
            page: page_value,
            limit: limit_value,
        })
    }

    /// Build a page request from raw query-string values.
    ///
    /// Absent or non-numeric values fall back to the defaults, as do values
    /// too large for an `i64`; numeric values below one are rejected.
    ///
    /// # Errors
    /// Propagates the validation errors of [`PageRequest::new`].
    ///
    /// # Examples
    /// ```
    /// use pagination::{DEFAULT_LIMIT, PageRequest};
    ///
    /// let page = PageRequest::from_query(Some("2"), Some("abc")).expect("valid page");
    /// assert_eq!(page.page(), 2);
    /// assert_eq!(page.limit(), DEFAULT_LIMIT);
    /// ```
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Result<Self, PageError> {
        Self::new(
            lenient_number(page, DEFAULT_PAGE),
            lenient_number(limit, DEFAULT_LIMIT),
        )
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of items skipped before this page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Index window this page covers within a sequence of `total` items.
    ///
    /// The window end is clamped to `total`, so the last page may be short.
    ///
    /// # Errors
    /// Returns [`PageError::OutOfRange`] when the page starts at or beyond
    /// `total`.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let page = PageRequest::new(2, 2).expect("valid page");
    /// assert_eq!(page.window(3), Ok(2..3));
    /// assert!(page.window(2).is_err());
    /// ```
    pub fn window(&self, total: usize) -> Result<Range<usize>, PageError> {
        let out_of_range = PageError::OutOfRange {
            page: self.page,
            limit: self.limit,
            total,
        };
        let start = usize::try_from(self.offset()).map_err(|_| out_of_range.clone())?;
        if start >= total {
            return Err(out_of_range);
        }
        let len = usize::try_from(self.limit).unwrap_or(usize::MAX);
        Ok(start..start.saturating_add(len).min(total))
    }
}

fn lenient_number(raw: Option<&str>, fallback: u64) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or_else(|| i64::try_from(fallback).unwrap_or(i64::MAX))
}
