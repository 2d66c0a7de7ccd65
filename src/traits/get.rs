//! Get trait for fetching single resources.

use async_trait::async_trait;

use crate::client::CfClient;
use crate::error::Result;

/// Fetch a single resource by ID.
///
/// # Example
///
/// ```ignore
/// use cfapi::{CfClient, Package, Get};
///
/// let client = CfClient::from_env()?;
/// let package = Package::get(&client, "package-guid".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this resource (a GUID string).
    type Id;

    /// Fetch the resource by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist or the request fails.
    async fn get(client: &CfClient, id: Self::Id) -> Result<Self>;
}
