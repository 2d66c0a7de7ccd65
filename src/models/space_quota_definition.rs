//! v2 space quota definitions and the organization-scoped listing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{decode, CfClient};
use crate::error::{CfError, Result};
use crate::models::resource::Resource;
use crate::pagination::{Page, PaginatedResponse, PaginationParams};
use crate::traits::{Get, List};

/// Entity payload of a space quota definition.
///
/// Memory limits are in megabytes; `-1` means unlimited where the platform
/// allows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceQuotaDefinitionEntity {
    pub name: String,

    #[serde(rename = "organization_guid")]
    pub organization_id: String,

    #[serde(default)]
    pub non_basic_services_allowed: Option<bool>,

    #[serde(default)]
    pub total_services: Option<i64>,

    #[serde(default)]
    pub total_routes: Option<i64>,

    #[serde(default)]
    pub memory_limit: Option<i64>,

    #[serde(default)]
    pub instance_memory_limit: Option<i64>,

    #[serde(default)]
    pub app_instance_limit: Option<i64>,

    #[serde(default)]
    pub app_task_limit: Option<i64>,

    #[serde(default)]
    pub total_service_keys: Option<i64>,

    #[serde(default)]
    pub total_reserved_route_ports: Option<i64>,
}

/// A space quota definition resource.
pub type SpaceQuotaDefinition = Resource<SpaceQuotaDefinitionEntity>;

/// Request for one page of an organization's space quota definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOrganizationSpaceQuotaDefinitionsRequest {
    pub organization_id: String,
    pub page: Option<u32>,
    pub results_per_page: Option<u32>,
}

impl ListOrganizationSpaceQuotaDefinitionsRequest {
    pub fn builder() -> ListOrganizationSpaceQuotaDefinitionsRequestBuilder {
        ListOrganizationSpaceQuotaDefinitionsRequestBuilder::default()
    }
}

/// Builder for [`ListOrganizationSpaceQuotaDefinitionsRequest`].
#[derive(Debug, Clone, Default)]
pub struct ListOrganizationSpaceQuotaDefinitionsRequestBuilder {
    organization_id: Option<String>,
    page: Option<u32>,
    results_per_page: Option<u32>,
}

impl ListOrganizationSpaceQuotaDefinitionsRequestBuilder {
    pub fn organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn results_per_page(mut self, results_per_page: u32) -> Self {
        self.results_per_page = Some(results_per_page);
        self
    }

    /// Build the request.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::Validation`] if `organization_id` is missing.
    pub fn build(self) -> Result<ListOrganizationSpaceQuotaDefinitionsRequest> {
        let organization_id = self.organization_id.ok_or_else(|| {
            CfError::missing_fields(
                "ListOrganizationSpaceQuotaDefinitionsRequest",
                &[("organization_id", true)],
            )
        })?;

        Ok(ListOrganizationSpaceQuotaDefinitionsRequest {
            organization_id,
            page: self.page,
            results_per_page: self.results_per_page,
        })
    }
}

/// List one page of the space quota definitions owned by an organization.
///
/// Pages are 1-indexed; a request without a page asks for page 1.
///
/// # Example
///
/// ```ignore
/// let request = ListOrganizationSpaceQuotaDefinitionsRequest::builder()
///     .organization_id("org-guid")
///     .page(1)
///     .build()?;
/// let page = list_space_quota_definitions(&client, &request).await?;
/// for definition in &page {
///     println!("{}", definition.entity.name);
/// }
/// ```
#[tracing::instrument(skip(client))]
pub async fn list_space_quota_definitions(
    client: &CfClient,
    request: &ListOrganizationSpaceQuotaDefinitionsRequest,
) -> Result<Page<SpaceQuotaDefinition>> {
    let page = request.page.unwrap_or(1);
    let params = PaginationParams {
        page: Some(page),
        results_per_page: request.results_per_page,
        order_direction: None,
    };
    let path = format!(
        "v2/organizations/{}/space_quota_definitions",
        urlencoding::encode(&request.organization_id)
    );

    let response = client.get_with_query(&path, &params).await?;
    let data: PaginatedResponse<SpaceQuotaDefinition> = decode(response).await?;

    Ok(data.into_page(page))
}

#[async_trait]
impl Get for SpaceQuotaDefinition {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &CfClient, id: String) -> Result<Self> {
        let path = format!("v2/space_quota_definitions/{}", urlencoding::encode(&id));

        let response = client.get(&path).await?;
        let definition: SpaceQuotaDefinition = decode(response).await?;
        Ok(definition)
    }
}

#[async_trait]
impl List for SpaceQuotaDefinition {
    /// Organization GUID.
    type Query = String;

    async fn list_page(
        client: &CfClient,
        organization_id: &String,
        page: u32,
        results_per_page: u32,
    ) -> Result<Page<Self>> {
        let request = ListOrganizationSpaceQuotaDefinitionsRequest {
            organization_id: organization_id.clone(),
            page: Some(page),
            results_per_page: Some(results_per_page),
        };
        list_space_quota_definitions(client, &request).await
    }
}
