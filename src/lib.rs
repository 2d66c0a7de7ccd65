//! Cloud Foundry API client library.
//!
//! Typed bindings for the Cloud Foundry Cloud Controller (v2 and v3) and UAA
//! REST APIs. Each resource type implements the operation traits its
//! endpoints support (Get, List, Create, Delete); requests are immutable
//! values produced by builders that refuse to build without their required
//! fields.
//!
//! # Quick Start
//!
//! ```no_run
//! use cfapi::{CfClient, Create, CreatePackageRequest, Package, PackageType};
//!
//! #[tokio::main]
//! async fn main() -> cfapi::Result<()> {
//!     // Create client from environment variables
//!     let client = CfClient::from_env()?;
//!
//!     // Create a docker package for an application
//!     let request = CreatePackageRequest::builder()
//!         .application_id("application-guid")
//!         .package_type(PackageType::Docker)
//!         .url("docker://cloudfoundry/runtime-ci")
//!         .build()?;
//!     let package = Package::create(&client, request).await?;
//!     println!("Package {} is {:?}", package.id, package.state);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`CfClient`] performs single-shot HTTP exchanges and turns non-2xx
//!   responses into [`CfError::ApiError`].
//! - [`Get`], [`List`], [`Create`] and [`Delete`] are implemented by
//!   [`Package`], [`Buildpack`] and [`SpaceQuotaDefinition`].
//! - [`SpaceAdmin`] composes listing calls into a lookup by name.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `CF_ACCESS_TOKEN` (required) - Bearer token for the Cloud Controller
//! - `CF_API_URL` (optional) - Cloud Controller URL (defaults to `https://api.run.pivotal.io`)
//! - `CF_UAA_URL` (optional) - UAA URL (derived from the API URL by default)

mod client;
mod error;
mod models;
mod operations;
mod pagination;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::CfClient;
pub use error::{CfError, Result};
pub use pagination::{OrderDirection, Page, PaginatedResponse, PaginationParams};

// Re-export traits
pub use traits::{Create, Delete, Get, List, DEFAULT_RESULTS_PER_PAGE};

// Re-export models
pub use models::{
    // Shared shapes
    Link,
    Links,
    Metadata,
    Resource,
    // v3 packages
    CreatePackageRequest,
    CreatePackageRequestBuilder,
    Hash,
    Package,
    PackageState,
    PackageType,
    UploadPackageRequest,
    UploadPackageRequestBuilder,
    // v2 buildpacks
    Buildpack,
    BuildpackEntity,
    CreateBuildpackRequest,
    CreateBuildpackRequestBuilder,
    UploadBuildpackRequest,
    UploadBuildpackRequestBuilder,
    // v2 space quota definitions
    ListOrganizationSpaceQuotaDefinitionsRequest,
    ListOrganizationSpaceQuotaDefinitionsRequestBuilder,
    SpaceQuotaDefinition,
    SpaceQuotaDefinitionEntity,
    // UAA tokens
    GetTokenByClientCredentialsRequest,
    GetTokenByClientCredentialsRequestBuilder,
    GetTokenByOpenIdRequest,
    GetTokenByOpenIdRequestBuilder,
    TokenFormat,
    TokenResponse,
};

// Re-export endpoint functions
pub use models::{get_token_by_client_credentials, get_token_by_open_id, list_space_quota_definitions};

// Re-export operations
pub use operations::{GetSpaceQuotaRequest, GetSpaceQuotaRequestBuilder, SpaceAdmin, SpaceQuota};
