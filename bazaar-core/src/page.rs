//! Pagination and result types for order listings.
//!
//! This module provides the [`Page`] struct for result pages and
//! [`PaginationParams`] for specifying which page to fetch.

use std::cmp::min;
use serde::{Deserialize, Serialize};

/// Page size used when a caller asks for a non-positive limit.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A single page of paginated results.
///
/// # Example
///
/// ```ignore
/// use bazaar::page::PaginationParams;
///
/// let page = PaginationParams::new(2, 5).paginate((1..=12).collect::<Vec<_>>());
///
/// assert_eq!(page.items, vec![6, 7, 8, 9, 10]);
/// assert_eq!(page.total, 12);
/// assert_eq!(page.pages(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items contained in this page.
    pub items: Vec<T>,
    /// Total count of matching items across all pages.
    pub total: usize,
    /// The page size this page was cut with.
    pub per_page: usize,
    /// The next page number (if more pages exist).
    pub next_page: Option<usize>,
    /// The previous page number (if this is not the first page).
    pub previous_page: Option<usize>,
}

impl<T> Page<T> {
    /// Creates a new builder for constructing a page with custom settings.
    pub fn builder(items: Vec<T>) -> PageBuilder<T> {
        PageBuilder::new(items)
    }

    /// Number of pages needed to hold `total` items, i.e. `ceil(total / per_page)`.
    pub fn pages(&self) -> usize {
        self.total.div_ceil(self.per_page.max(1))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            per_page: DEFAULT_PAGE_SIZE,
            next_page: None,
            previous_page: None,
        }
    }
}

/// Builder for constructing [`Page`] instances with fluent API.
pub struct PageBuilder<T> {
    items: Vec<T>,
    total: usize,
    per_page: usize,
    next_page: Option<usize>,
    previous_page: Option<usize>,
}

impl<T> PageBuilder<T> {
    /// Creates a new builder with the given items.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            total: 0,
            per_page: DEFAULT_PAGE_SIZE,
            next_page: None,
            previous_page: None,
        }
    }

    /// Sets the total count of items across all pages.
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = total;
        self
    }

    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    /// Sets the next page number (or `None` if this is the last page).
    pub fn with_next_page(mut self, next_page: Option<usize>) -> Self {
        self.next_page = next_page;
        self
    }

    /// Sets the previous page number (or `None` if this is the first page).
    pub fn with_previous_page(mut self, previous_page: Option<usize>) -> Self {
        self.previous_page = previous_page;
        self
    }

    /// Builds and returns the final [`Page`] instance.
    pub fn build(self) -> Page<T> {
        Page {
            items: self.items,
            total: self.total,
            per_page: self.per_page,
            next_page: self.next_page,
            previous_page: self.previous_page,
        }
    }
}

/// Which page of a result set to return.
///
/// Pages are 1-indexed. Non-positive inputs fall back to the defaults
/// (page 1, [`DEFAULT_PAGE_SIZE`] items per page), so every value of this type
/// describes a valid page.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    page: usize,
    per_page: usize,
}

impl PaginationParams {
    /// Creates pagination parameters from raw request values.
    ///
    /// `page <= 0` becomes 1 and `per_page <= 0` becomes [`DEFAULT_PAGE_SIZE`].
    pub fn new(page: i32, per_page: i32) -> Self {
        Self {
            page: usize::try_from(page).ok().filter(|p| *p > 0).unwrap_or(1),
            per_page: usize::try_from(per_page)
                .ok()
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Creates a new builder for constructing pagination parameters.
    pub fn builder() -> PaginationParamsBuilder {
        PaginationParamsBuilder::new()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Zero-based index of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Cuts this page out of the full, already filtered, result set.
    ///
    /// An offset past the end yields an empty page that still reports the
    /// full `total`.
    pub fn paginate<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len();
        let offset = self.offset();
        let previous_page = (self.page > 1).then(|| self.page - 1);

        if offset >= total {
            return Page::builder(Vec::new())
                .with_total(total)
                .with_per_page(self.per_page)
                .with_previous_page(previous_page)
                .build();
        }

        let end = min(offset.saturating_add(self.per_page), total);
        let paginated_items = items
            .into_iter()
            .skip(offset)
            .take(end - offset)
            .collect();

        Page::builder(paginated_items)
            .with_total(total)
            .with_per_page(self.per_page)
            .with_next_page((end < total).then(|| self.page + 1))
            .with_previous_page(previous_page)
            .build()
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Builder for constructing [`PaginationParams`] instances.
pub struct PaginationParamsBuilder {
    page: Option<i32>,
    per_page: Option<i32>,
}

impl PaginationParamsBuilder {
    /// Creates a new builder with no parameters set.
    pub fn new() -> Self {
        Self {
            page: None,
            per_page: None,
        }
    }

    /// Sets the page number (1-indexed).
    pub fn with_page(mut self, page: i32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the number of items per page.
    pub fn with_per_page(mut self, per_page: i32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Builds and returns the [`PaginationParams`], applying defaults for unset
    /// or non-positive values.
    pub fn build(self) -> PaginationParams {
        PaginationParams::new(self.page.unwrap_or(1), self.per_page.unwrap_or(0))
    }
}

impl Default for PaginationParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
