//! v3 package model and trait implementations.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{decode, CfClient};
use crate::error::{CfError, Result};
use crate::models::resource::{Link, Links};
use crate::models::upload::file_form;
use crate::traits::{Create, Delete, Get};

/// The kind of content a package holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    /// Application bits uploaded as an archive.
    Bits,
    /// A reference to a docker image.
    Docker,
}

/// Lifecycle state of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageState {
    AwaitingUpload,
    ProcessingUpload,
    Ready,
    Failed,
    Copying,
    Expired,
}

/// Checksum of the package contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hash {
    /// Hash algorithm (e.g. "sha1").
    #[serde(rename = "type")]
    pub hash_type: String,
    /// Hash value; `None` until bits have been processed.
    #[serde(default)]
    pub value: Option<String>,
}

/// A v3 package: the bits or docker image an application is staged from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// The package GUID.
    #[serde(rename = "guid")]
    pub id: String,

    #[serde(rename = "type")]
    pub package_type: PackageType,

    pub state: PackageState,

    /// Docker image URL, for docker packages.
    #[serde(default)]
    pub url: Option<String>,

    pub hash: Hash,

    /// Failure description when `state` is `FAILED`.
    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(rename = "_links", alias = "links", default)]
    pub links: Links,
}

impl Package {
    /// Look up a link by relation name (`self`, `app`, `upload`, `download`, `stage`).
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.get(rel)
    }

    /// Check if the package is ready to be staged.
    pub fn is_ready(&self) -> bool {
        self.state == PackageState::Ready
    }

    /// Upload bits for a package.
    ///
    /// Sends the file as the `bits` field of a `multipart/form-data` body.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let request = UploadPackageRequest::builder()
    ///     .id("package-guid")
    ///     .file("target/app.zip")
    ///     .build()?;
    /// let package = Package::upload(&client, request).await?;
    /// assert_eq!(package.state, PackageState::ProcessingUpload);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CfError::Io`] if the file cannot be read, or an API error if
    /// the platform rejects the upload.
    #[tracing::instrument(skip(client))]
    pub async fn upload(client: &CfClient, request: UploadPackageRequest) -> Result<Self> {
        let form = file_form("bits", &request.file, None).await?;
        let path = format!("v3/packages/{}/upload", urlencoding::encode(&request.id));

        let response = client.post_multipart(&path, form).await?;
        let package: Package = decode(response).await?;
        Ok(package)
    }
}

/// Request to create a package for an application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePackageRequest {
    /// Owning application; part of the URL, not the body.
    #[serde(skip)]
    pub application_id: String,

    #[serde(rename = "type")]
    pub package_type: PackageType,

    /// Docker image URL (docker packages only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CreatePackageRequest {
    pub fn builder() -> CreatePackageRequestBuilder {
        CreatePackageRequestBuilder::default()
    }
}

/// Builder for [`CreatePackageRequest`].
#[derive(Debug, Clone, Default)]
pub struct CreatePackageRequestBuilder {
    application_id: Option<String>,
    package_type: Option<PackageType>,
    url: Option<String>,
}

impl CreatePackageRequestBuilder {
    pub fn application_id(mut self, application_id: impl Into<String>) -> Self {
        self.application_id = Some(application_id.into());
        self
    }

    pub fn package_type(mut self, package_type: PackageType) -> Self {
        self.package_type = Some(package_type);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Build the request.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::Validation`] if `application_id` or `type` is missing.
    pub fn build(self) -> Result<CreatePackageRequest> {
        match (self.application_id, self.package_type) {
            (Some(application_id), Some(package_type)) => Ok(CreatePackageRequest {
                application_id,
                package_type,
                url: self.url,
            }),
            (application_id, package_type) => Err(CfError::missing_fields(
                "CreatePackageRequest",
                &[
                    ("application_id", application_id.is_none()),
                    ("type", package_type.is_none()),
                ],
            )),
        }
    }
}

/// Request to upload bits into an existing package.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPackageRequest {
    /// The package GUID.
    pub id: String,
    /// Archive to upload.
    pub file: PathBuf,
}

impl UploadPackageRequest {
    pub fn builder() -> UploadPackageRequestBuilder {
        UploadPackageRequestBuilder::default()
    }
}

/// Builder for [`UploadPackageRequest`].
#[derive(Debug, Clone, Default)]
pub struct UploadPackageRequestBuilder {
    id: Option<String>,
    file: Option<PathBuf>,
}

impl UploadPackageRequestBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Build the request.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::Validation`] if `id` or `file` is missing.
    pub fn build(self) -> Result<UploadPackageRequest> {
        match (self.id, self.file) {
            (Some(id), Some(file)) => Ok(UploadPackageRequest { id, file }),
            (id, file) => Err(CfError::missing_fields(
                "UploadPackageRequest",
                &[("id", id.is_none()), ("file", file.is_none())],
            )),
        }
    }
}

#[async_trait]
impl Create for Package {
    type Request = CreatePackageRequest;

    #[tracing::instrument(skip(client))]
    async fn create(client: &CfClient, request: CreatePackageRequest) -> Result<Self> {
        let path = format!(
            "v3/apps/{}/packages",
            urlencoding::encode(&request.application_id)
        );

        let response = client.post(&path, &request).await?;
        let package: Package = decode(response).await?;
        Ok(package)
    }
}

#[async_trait]
impl Get for Package {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &CfClient, id: String) -> Result<Self> {
        let path = format!("v3/packages/{}", urlencoding::encode(&id));

        let response = client.get(&path).await?;
        let package: Package = decode(response).await?;
        Ok(package)
    }
}

#[async_trait]
impl Delete for Package {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &CfClient, id: String) -> Result<()> {
        let path = format!("v3/packages/{}", urlencoding::encode(&id));
        client.delete(&path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_body() {
        let request = CreatePackageRequest::builder()
            .application_id("test-application-id")
            .package_type(PackageType::Docker)
            .url("docker://cloudfoundry/runtime-ci")
            .build()
            .unwrap();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "docker", "url": "docker://cloudfoundry/runtime-ci"})
        );
    }

    #[test]
    fn test_create_request_omits_absent_url() {
        let request = CreatePackageRequest::builder()
            .application_id("app")
            .package_type(PackageType::Bits)
            .build()
            .unwrap();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"type": "bits"}));
    }

    #[test]
    fn test_create_request_missing_fields() {
        let err = CreatePackageRequest::builder().build().unwrap_err();
        match err {
            CfError::Validation { request, missing } => {
                assert_eq!(request, "CreatePackageRequest");
                assert_eq!(missing, vec!["application_id", "type"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = CreatePackageRequest::builder()
            .application_id("app")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("type"));
        assert!(!err.to_string().contains("application_id"));
    }

    #[test]
    fn test_upload_request_missing_fields() {
        let err = UploadPackageRequest::builder().build().unwrap_err();
        assert!(matches!(err, CfError::Validation { ref missing, .. } if missing == &vec!["id", "file"]));

        let err = UploadPackageRequest::builder().id("test-id").build().unwrap_err();
        assert!(matches!(err, CfError::Validation { ref missing, .. } if missing == &vec!["file"]));
    }

    #[test]
    fn test_package_deserialize() {
        let json = r#"{
            "guid": "126e54c4-811d-4f7a-9a34-804130a75ab2",
            "type": "docker",
            "hash": {"type": "sha1", "value": null},
            "url": "docker://cloudfoundry/runtime-ci",
            "state": "READY",
            "error": null,
            "created_at": "2015-08-06T00:36:55Z",
            "updated_at": null,
            "_links": {
                "self": {"href": "/v3/packages/126e54c4-811d-4f7a-9a34-804130a75ab2"},
                "app": {"href": "/v3/apps/guid-f6b6a0b6-a5b4-4ce3-9bf2-2fcca6bce83c"}
            }
        }"#;
        let package: Package = serde_json::from_str(json).expect("Failed to deserialize package");

        assert_eq!(package.id, "126e54c4-811d-4f7a-9a34-804130a75ab2");
        assert_eq!(package.package_type, PackageType::Docker);
        assert_eq!(package.state, PackageState::Ready);
        assert!(package.is_ready());
        assert_eq!(package.hash.hash_type, "sha1");
        assert!(package.hash.value.is_none());
        assert!(package.error.is_none());
        assert!(package.updated_at.is_none());
        assert_eq!(package.links.len(), 2);
        assert!(package.link("self").is_some());
        assert!(package.link("app").is_some());
        assert!(package.link("upload").is_none());
    }

    #[test]
    fn test_package_accepts_links_key() {
        let json = r#"{
            "guid": "p1",
            "type": "bits",
            "hash": {"type": "sha1"},
            "state": "AWAITING_UPLOAD",
            "links": {"upload": {"href": "/v3/packages/p1/upload", "method": "POST"}}
        }"#;
        let package: Package = serde_json::from_str(json).unwrap();

        assert_eq!(package.state, PackageState::AwaitingUpload);
        assert_eq!(package.link("upload").and_then(|l| l.method.as_deref()), Some("POST"));
        assert!(package.url.is_none());
        assert!(package.created_at.is_none());
    }
}
