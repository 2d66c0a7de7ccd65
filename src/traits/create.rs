//! Create trait for resources built from a typed request.

use async_trait::async_trait;

use crate::client::CfClient;
use crate::error::Result;

/// Create a resource from a validated request value.
///
/// Request types can only be obtained through their builders, so a request
/// that reaches `create` always carries its required fields.
///
/// # Example
///
/// ```ignore
/// use cfapi::{CfClient, Buildpack, Create, CreateBuildpackRequest};
///
/// let client = CfClient::from_env()?;
/// let request = CreateBuildpackRequest::builder()
///     .name("java_buildpack")
///     .position(1)
///     .build()?;
/// let buildpack = Buildpack::create(&client, request).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// The request payload.
    type Request: Send;

    /// Create the resource and return the server's representation of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the request.
    async fn create(client: &CfClient, request: Self::Request) -> Result<Self>;
}
