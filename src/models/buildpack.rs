//! v2 buildpack model and trait implementations.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{decode, CfClient};
use crate::error::{CfError, Result};
use crate::models::resource::Resource;
use crate::models::upload::file_form;
use crate::pagination::{Page, PaginatedResponse, PaginationParams};
use crate::traits::{Create, Delete, Get, List};

/// Entity payload of a buildpack resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildpackEntity {
    pub name: String,

    /// Detection order among all buildpacks (1 is checked first).
    #[serde(default)]
    pub position: Option<u32>,

    #[serde(default)]
    pub enabled: Option<bool>,

    /// Locked buildpacks cannot be updated.
    #[serde(default)]
    pub locked: Option<bool>,

    /// Name of the uploaded archive, once bits exist.
    #[serde(default)]
    pub filename: Option<String>,
}

/// A buildpack resource.
pub type Buildpack = Resource<BuildpackEntity>;

/// Request payload for creating a buildpack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateBuildpackRequest {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl CreateBuildpackRequest {
    pub fn builder() -> CreateBuildpackRequestBuilder {
        CreateBuildpackRequestBuilder::default()
    }
}

/// Builder for [`CreateBuildpackRequest`].
#[derive(Debug, Clone, Default)]
pub struct CreateBuildpackRequestBuilder {
    name: Option<String>,
    enabled: Option<bool>,
    filename: Option<String>,
    locked: Option<bool>,
    position: Option<u32>,
}

impl CreateBuildpackRequestBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    /// Build the request.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::Validation`] if `name` is missing.
    pub fn build(self) -> Result<CreateBuildpackRequest> {
        let name = self.name.ok_or_else(|| {
            CfError::missing_fields("CreateBuildpackRequest", &[("name", true)])
        })?;

        Ok(CreateBuildpackRequest {
            name,
            enabled: self.enabled,
            filename: self.filename,
            locked: self.locked,
            position: self.position,
        })
    }
}

/// Request to upload a buildpack archive.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadBuildpackRequest {
    /// The buildpack GUID.
    pub buildpack_id: String,
    /// Archive to upload.
    pub file: PathBuf,
    /// Filename reported to the platform; defaults to the file's own name.
    pub filename: Option<String>,
}

impl UploadBuildpackRequest {
    pub fn builder() -> UploadBuildpackRequestBuilder {
        UploadBuildpackRequestBuilder::default()
    }
}

/// Builder for [`UploadBuildpackRequest`].
#[derive(Debug, Clone, Default)]
pub struct UploadBuildpackRequestBuilder {
    buildpack_id: Option<String>,
    file: Option<PathBuf>,
    filename: Option<String>,
}

impl UploadBuildpackRequestBuilder {
    pub fn buildpack_id(mut self, buildpack_id: impl Into<String>) -> Self {
        self.buildpack_id = Some(buildpack_id.into());
        self
    }

    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Build the request.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::Validation`] if `buildpack_id` or `file` is missing.
    pub fn build(self) -> Result<UploadBuildpackRequest> {
        match (self.buildpack_id, self.file) {
            (Some(buildpack_id), Some(file)) => Ok(UploadBuildpackRequest {
                buildpack_id,
                file,
                filename: self.filename,
            }),
            (buildpack_id, file) => Err(CfError::missing_fields(
                "UploadBuildpackRequest",
                &[
                    ("buildpack_id", buildpack_id.is_none()),
                    ("file", file.is_none()),
                ],
            )),
        }
    }
}

impl Buildpack {
    /// Upload the archive for a buildpack.
    ///
    /// Sends the file as the `buildpack` field of a `multipart/form-data` PUT.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::Io`] if the file cannot be read, or an API error if
    /// the platform rejects the archive.
    #[tracing::instrument(skip(client))]
    pub async fn upload(client: &CfClient, request: UploadBuildpackRequest) -> Result<Self> {
        let form = file_form("buildpack", &request.file, request.filename.as_deref()).await?;
        let path = format!("v2/buildpacks/{}/bits", urlencoding::encode(&request.buildpack_id));

        let response = client.put_multipart(&path, form).await?;
        let buildpack: Buildpack = decode(response).await?;
        Ok(buildpack)
    }
}

#[async_trait]
impl Create for Buildpack {
    type Request = CreateBuildpackRequest;

    #[tracing::instrument(skip(client))]
    async fn create(client: &CfClient, request: CreateBuildpackRequest) -> Result<Self> {
        let response = client.post("v2/buildpacks", &request).await?;
        let buildpack: Buildpack = decode(response).await?;
        Ok(buildpack)
    }
}

#[async_trait]
impl Get for Buildpack {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &CfClient, id: String) -> Result<Self> {
        let path = format!("v2/buildpacks/{}", urlencoding::encode(&id));

        let response = client.get(&path).await?;
        let buildpack: Buildpack = decode(response).await?;
        Ok(buildpack)
    }
}

#[async_trait]
impl List for Buildpack {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &CfClient,
        _query: &(),
        page: u32,
        results_per_page: u32,
    ) -> Result<Page<Self>> {
        let params = PaginationParams::for_page(page, results_per_page);

        let response = client.get_with_query("v2/buildpacks", &params).await?;
        let data: PaginatedResponse<Buildpack> = decode(response).await?;

        Ok(data.into_page(page))
    }
}

#[async_trait]
impl Delete for Buildpack {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &CfClient, id: String) -> Result<()> {
        let path = format!("v2/buildpacks/{}", urlencoding::encode(&id));
        client.delete(&path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_full_body() {
        let request = CreateBuildpackRequest::builder()
            .name("Golang_buildpack")
            .enabled(true)
            .filename("golang_buildpack.zip")
            .locked(false)
            .position(10)
            .build()
            .unwrap();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Golang_buildpack",
                "enabled": true,
                "filename": "golang_buildpack.zip",
                "locked": false,
                "position": 10
            })
        );
    }

    #[test]
    fn test_create_request_only_serializes_present_fields() {
        let request = CreateBuildpackRequest::builder()
            .name("Golang_buildpack")
            .build()
            .unwrap();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Golang_buildpack"}));
    }

    #[test]
    fn test_create_request_requires_name() {
        let err = CreateBuildpackRequest::builder().position(1).build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "CreateBuildpackRequest is missing required field(s): name"
        );
    }

    #[test]
    fn test_upload_request_requires_id_and_file() {
        let err = UploadBuildpackRequest::builder()
            .filename("bp.zip")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("buildpack_id, file"));
    }

    #[test]
    fn test_buildpack_deserialize() {
        let json = r#"{
            "metadata": {
                "guid": "c1d5d4c4-ad47-4b4c-8c43-f6b9ec9a4c2a",
                "url": "/v2/buildpacks/c1d5d4c4-ad47-4b4c-8c43-f6b9ec9a4c2a",
                "created_at": "2016-03-17T21:41:29Z",
                "updated_at": null
            },
            "entity": {
                "name": "Golang_buildpack",
                "position": 10,
                "enabled": true,
                "locked": false,
                "filename": null
            }
        }"#;
        let buildpack: Buildpack = serde_json::from_str(json).unwrap();

        assert_eq!(buildpack.id(), "c1d5d4c4-ad47-4b4c-8c43-f6b9ec9a4c2a");
        assert_eq!(buildpack.entity.name, "Golang_buildpack");
        assert_eq!(buildpack.entity.position, Some(10));
        assert_eq!(buildpack.entity.enabled, Some(true));
        assert_eq!(buildpack.entity.locked, Some(false));
        assert!(buildpack.entity.filename.is_none());
    }
}
