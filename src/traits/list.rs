//! List trait for fetching collections of resources.

use async_trait::async_trait;

use crate::client::CfClient;
use crate::error::Result;
use crate::pagination::Page;

/// Default page size for list operations.
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 50;

/// Maximum pages to fetch (safety limit).
pub(crate) const MAX_PAGES: u32 = 1000;

/// List resources with pagination support.
///
/// # Example
///
/// ```ignore
/// use cfapi::{CfClient, Buildpack, List};
///
/// let client = CfClient::from_env()?;
///
/// // Fetch a single page
/// let page = Buildpack::list_page(&client, &(), 1, 50).await?;
///
/// // Fetch all pages
/// let all = Buildpack::list_all(&client, &()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Scope or filter for the listing.
    type Query: Send + Sync;

    /// List resources matching the query (single page).
    ///
    /// # Arguments
    ///
    /// * `client` - The Cloud Foundry API client
    /// * `query` - Listing scope or filter
    /// * `page` - Page number (1-indexed)
    /// * `results_per_page` - Number of items per page (max 100)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &CfClient,
        query: &Self::Query,
        page: u32,
        results_per_page: u32,
    ) -> Result<Page<Self>>;

    /// List all resources matching the query, in page order.
    ///
    /// Stops after the last page, or early at an empty page.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &CfClient, query: &Self::Query) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let result = Self::list_page(client, query, page, DEFAULT_RESULTS_PER_PAGE).await?;
            tracing::debug!(page, items = result.len(), total_pages = result.total_pages, "fetched page");
            let has_more = result.has_more && !result.is_empty();
            all_items.extend(result.items);

            if !has_more {
                break;
            }
            page += 1;

            if page > MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }
}
