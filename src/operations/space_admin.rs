//! Space quota administration for a single organization.

use serde::{Deserialize, Serialize};

use crate::client::CfClient;
use crate::error::{CfError, Result};
use crate::models::{
    list_space_quota_definitions, ListOrganizationSpaceQuotaDefinitionsRequest,
    SpaceQuotaDefinition,
};
use crate::pagination::Page;
use crate::traits::{List, MAX_PAGES};

/// A space quota as seen by an organization administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceQuota {
    pub id: String,
    pub name: String,
    pub organization_id: String,
    pub paid_services_allowed: Option<bool>,
    pub total_service_instances: Option<i64>,
    pub total_routes: Option<i64>,
    pub total_memory_limit: Option<i64>,
    pub instance_memory_limit: Option<i64>,
    pub app_instance_limit: Option<i64>,
}

impl From<&SpaceQuotaDefinition> for SpaceQuota {
    fn from(definition: &SpaceQuotaDefinition) -> Self {
        let entity = &definition.entity;
        Self {
            id: definition.metadata.id.clone(),
            name: entity.name.clone(),
            organization_id: entity.organization_id.clone(),
            paid_services_allowed: entity.non_basic_services_allowed,
            total_service_instances: entity.total_services,
            total_routes: entity.total_routes,
            total_memory_limit: entity.memory_limit,
            instance_memory_limit: entity.instance_memory_limit,
            app_instance_limit: entity.app_instance_limit,
        }
    }
}

/// Request to look up a space quota by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSpaceQuotaRequest {
    pub name: String,
}

impl GetSpaceQuotaRequest {
    pub fn builder() -> GetSpaceQuotaRequestBuilder {
        GetSpaceQuotaRequestBuilder::default()
    }
}

/// Builder for [`GetSpaceQuotaRequest`].
#[derive(Debug, Clone, Default)]
pub struct GetSpaceQuotaRequestBuilder {
    name: Option<String>,
}

impl GetSpaceQuotaRequestBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the request.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::Validation`] if `name` is missing.
    pub fn build(self) -> Result<GetSpaceQuotaRequest> {
        let name = self
            .name
            .ok_or_else(|| CfError::missing_fields("GetSpaceQuotaRequest", &[("name", true)]))?;
        Ok(GetSpaceQuotaRequest { name })
    }
}

/// Space quota operations scoped to one organization.
///
/// # Example
///
/// ```no_run
/// use cfapi::{CfClient, GetSpaceQuotaRequest, SpaceAdmin};
///
/// # async fn example() -> cfapi::Result<()> {
/// let client = CfClient::from_env()?;
/// let space_admin = SpaceAdmin::new(client, "organization-guid");
///
/// let request = GetSpaceQuotaRequest::builder().name("small").build()?;
/// let quota = space_admin.get(&request).await?;
/// println!("{} allows {:?} MB", quota.name, quota.total_memory_limit);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SpaceAdmin {
    client: CfClient,
    organization_id: String,
}

impl SpaceAdmin {
    pub fn new(client: CfClient, organization_id: impl Into<String>) -> Self {
        Self {
            client,
            organization_id: organization_id.into(),
        }
    }

    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }

    /// Find the space quota with exactly the requested name.
    ///
    /// Pages are fetched in ascending order and fetching stops at the first
    /// match; every page is scanned before the quota is reported missing.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::NotFound`] if no definition carries the name, or
    /// any error raised while fetching a page.
    #[tracing::instrument(skip(self), fields(organization_id = %self.organization_id))]
    pub async fn get(&self, request: &GetSpaceQuotaRequest) -> Result<SpaceQuota> {
        let mut page_number = 1;

        loop {
            let page = self.fetch_page(page_number).await?;

            if let Some(definition) = page.iter().find(|d| d.entity.name == request.name) {
                tracing::debug!(page = page_number, id = definition.id(), "space quota found");
                return Ok(SpaceQuota::from(definition));
            }

            if !page.has_more || page.is_empty() {
                break;
            }
            page_number += 1;

            if page_number > MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Err(CfError::NotFound {
            entity_type: "Space Quota",
            name: request.name.clone(),
        })
    }

    /// List every space quota of the organization, in page order.
    ///
    /// # Errors
    ///
    /// Returns any error raised while fetching a page.
    #[tracing::instrument(skip(self), fields(organization_id = %self.organization_id))]
    pub async fn list_quotas(&self) -> Result<Vec<SpaceQuota>> {
        let definitions = SpaceQuotaDefinition::list_all(&self.client, &self.organization_id).await?;
        Ok(definitions.iter().map(SpaceQuota::from).collect())
    }

    async fn fetch_page(&self, page: u32) -> Result<Page<SpaceQuotaDefinition>> {
        let request = ListOrganizationSpaceQuotaDefinitionsRequest {
            organization_id: self.organization_id.clone(),
            page: Some(page),
            results_per_page: None,
        };

        let result = list_space_quota_definitions(&self.client, &request).await?;
        tracing::debug!(page, items = result.len(), total_pages = result.total_pages, "fetched space quota definitions");
        Ok(result)
    }
}
