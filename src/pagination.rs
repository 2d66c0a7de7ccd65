//! Pagination utilities for Cloud Foundry v2 listings.

use serde::{Deserialize, Serialize};

/// A page of results from a Cloud Foundry listing.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total_results: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// Current page number (1-indexed).
    pub page: u32,
    /// Whether there are more pages.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, total_pages: u32, total_results: u64) -> Self {
        Self {
            items,
            total_results,
            total_pages,
            page,
            has_more: page < total_pages,
        }
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_results: self.total_results,
            total_pages: self.total_pages,
            page: self.page,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Wire shape of a v2 paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<R> {
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub prev_url: Option<String>,
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default = "Vec::new")]
    pub resources: Vec<R>,
}

impl<R> PaginatedResponse<R> {
    /// Convert into a [`Page`], given the page number that was requested.
    #[must_use]
    pub fn into_page(self, page: u32) -> Page<R> {
        Page::new(self.resources, page, self.total_pages, self.total_results)
    }
}

/// Sort direction for v2 listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// Query parameters for paginated requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Number of items per page.
    #[serde(rename = "results-per-page", skip_serializing_if = "Option::is_none")]
    pub results_per_page: Option<u32>,
    /// Sort direction.
    #[serde(rename = "order-direction", skip_serializing_if = "Option::is_none")]
    pub order_direction: Option<OrderDirection>,
}

impl PaginationParams {
    /// Create pagination params for a specific page.
    #[must_use]
    pub fn for_page(page: u32, results_per_page: u32) -> Self {
        Self {
            page: Some(page),
            results_per_page: Some(results_per_page),
            order_direction: None,
        }
    }
}
