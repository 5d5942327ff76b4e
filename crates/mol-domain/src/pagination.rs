//! Page-number pagination bookkeeping shared by all list endpoints.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Raw `page` / `page_size` query parameters.
///
/// Kept as strings so that garbage input falls back to defaults instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Requested page, with `page_size` already clamped.
///
/// `page` is `None` when the caller asked for a page before the first one;
/// that request resolves to the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: Option<u64>,
    pub page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Some(1),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        Self::parse(query.page.as_deref(), query.page_size.as_deref())
    }
}

impl PageRequest {
    /// Parse raw query values.
    ///
    /// - `page_size`: unparsable or < 1 → 10, > 100 → 100
    /// - `page`: unparsable → 1, < 1 → last page
    pub fn parse(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page_size = match page_size.map(|v| v.trim().parse::<i64>()) {
            None => DEFAULT_PAGE_SIZE,
            Some(Ok(n)) if n > MAX_PAGE_SIZE as i64 => MAX_PAGE_SIZE,
            Some(Ok(n)) if n < 1 => DEFAULT_PAGE_SIZE,
            Some(Ok(n)) => n as u64,
            Some(Err(_)) => DEFAULT_PAGE_SIZE,
        };
        let page = match page.map(|v| v.trim().parse::<i64>()) {
            None | Some(Err(_)) => Some(1),
            Some(Ok(n)) if n < 1 => None,
            Some(Ok(n)) => Some(n as u64),
        };
        Self { page, page_size }
    }

    /// Resolve against the total item count, clamping to the last page.
    pub fn resolve(self, count: u64) -> PageWindow {
        let total_pages = if count == 0 {
            1
        } else {
            count.div_ceil(self.page_size)
        };
        let page = match self.page {
            Some(p) if p <= total_pages => p,
            _ => total_pages,
        };
        PageWindow {
            page,
            page_size: self.page_size,
            total_pages,
            offset: (page - 1) * self.page_size,
        }
    }
}

/// A concrete slice of a collection, ready to be turned into `LIMIT` / `OFFSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub offset: u64,
}

/// One page of results, in the list-endpoint wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(count: u64, window: PageWindow, results: Vec<T>) -> Self {
        Self {
            count,
            page: window.page,
            page_size: window.page_size,
            total_pages: window.total_pages,
            results,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
