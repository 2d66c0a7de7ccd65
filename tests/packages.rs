//! v3 package endpoint tests.
//!
//! Uses wiremock to stand in for the Cloud Controller.

use std::io::Write;

use cfapi::{
    CfClient, CfError, Create, CreatePackageRequest, Delete, Get, Package, PackageState,
    PackageType, UploadPackageRequest,
};
use tempfile::NamedTempFile;
use wiremock::matchers::{any, body_json, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_response() -> serde_json::Value {
    serde_json::json!({
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
    })
}

fn upload_response() -> serde_json::Value {
    serde_json::json!({
        "guid": "guid-9d6845e9-0dab-41e9-a1fb-48b5b8f35d50",
        "type": "bits",
        "hash": {"type": "sha1", "value": null},
        "url": null,
        "state": "PROCESSING_UPLOAD",
        "error": null,
        "created_at": "2015-08-06T00:36:54Z",
        "updated_at": "2015-08-06T00:36:55Z",
        "_links": {
            "self": {"href": "/v3/packages/guid-9d6845e9-0dab-41e9-a1fb-48b5b8f35d50"},
            "upload": {"href": "/v3/packages/guid-9d6845e9-0dab-41e9-a1fb-48b5b8f35d50/upload", "method": "POST"},
            "download": {"href": "/v3/packages/guid-9d6845e9-0dab-41e9-a1fb-48b5b8f35d50/download", "method": "GET"},
            "stage": {"href": "/v3/packages/guid-9d6845e9-0dab-41e9-a1fb-48b5b8f35d50/droplets", "method": "POST"},
            "app": {"href": "/v3/apps/guid-aa2a1d8f-1e07-4a8e-a4a3-c6dcd6e4b5a1"}
        }
    })
}

fn error_response() -> serde_json::Value {
    serde_json::json!({
        "code": 1001,
        "description": "Request invalid due to parse error: Field: name, Error: Missing field name",
        "error_code": "CF-MessageParseError"
    })
}

fn docker_request() -> CreatePackageRequest {
    CreatePackageRequest::builder()
        .application_id("test-application-id")
        .package_type(PackageType::Docker)
        .url("docker://cloudfoundry/runtime-ci")
        .build()
        .unwrap()
}

fn test_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"test-content").unwrap();
    file
}

#[tokio::test]
async fn test_create() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/apps/test-application-id/packages"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(serde_json::json!({
            "type": "docker",
            "url": "docker://cloudfoundry/runtime-ci"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(create_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let package = Package::create(&client, docker_request()).await.unwrap();

    assert_eq!(
        package.created_at.map(|t| t.to_rfc3339()),
        Some("2015-08-06T00:36:55+00:00".to_string())
    );
    assert!(package.error.is_none());
    assert_eq!(package.hash.hash_type, "sha1");
    assert!(package.hash.value.is_none());
    assert_eq!(package.id, "126e54c4-811d-4f7a-9a34-804130a75ab2");
    assert_eq!(package.links.len(), 2);
    assert!(package.link("self").is_some());
    assert!(package.link("app").is_some());
    assert_eq!(package.state, PackageState::Ready);
    assert_eq!(package.package_type, PackageType::Docker);
    assert!(package.updated_at.is_none());
    assert_eq!(package.url.as_deref(), Some("docker://cloudfoundry/runtime-ci"));
}

#[tokio::test]
async fn test_create_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/apps/test-application-id/packages"))
        .respond_with(ResponseTemplate::new(422).set_body_json(error_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Package::create(&client, docker_request()).await.unwrap_err();

    match err {
        CfError::ApiError {
            status_code,
            code,
            error_code,
            description,
        } => {
            assert_eq!(status_code, 422);
            assert_eq!(code, Some(1001));
            assert_eq!(error_code.as_deref(), Some("CF-MessageParseError"));
            assert!(description.starts_with("Request invalid due to parse error"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_invalid_request() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = CreatePackageRequest::builder().build().unwrap_err();
    assert!(matches!(err, CfError::Validation { .. }));
}

#[tokio::test]
async fn test_create_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/apps/test-application-id/packages"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"guid": 42})))
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Package::create(&client, docker_request()).await.unwrap_err();

    assert!(matches!(err, CfError::ParseError(_)));
    assert!(err.to_string().starts_with("Failed to parse response"));
}

#[tokio::test]
async fn test_get_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/packages/test-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"guid": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Package::get(&client, "test-id".to_string()).await.unwrap_err();

    assert!(matches!(err, CfError::ParseError(_)));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_upload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/packages/test-id/upload"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(201).set_body_json(upload_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let file = test_file();
    let request = UploadPackageRequest::builder()
        .file(file.path())
        .id("test-id")
        .build()
        .unwrap();

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let package = Package::upload(&client, request).await.unwrap();

    assert!(package.error.is_none());
    assert_eq!(package.hash.hash_type, "sha1");
    assert!(package.hash.value.is_none());
    assert_eq!(package.id, "guid-9d6845e9-0dab-41e9-a1fb-48b5b8f35d50");
    assert_eq!(package.links.len(), 5);
    for rel in ["self", "upload", "download", "stage", "app"] {
        assert!(package.link(rel).is_some(), "missing link {rel}");
    }
    assert_eq!(package.state, PackageState::ProcessingUpload);
    assert_eq!(package.package_type, PackageType::Bits);
    assert!(package.updated_at.is_some());
    assert!(package.url.is_none());
}

#[tokio::test]
async fn test_upload_sends_file_contents() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/packages/test-id/upload"))
        .respond_with(ResponseTemplate::new(201).set_body_json(upload_response()))
        .mount(&mock_server)
        .await;

    let file = test_file();
    let request = UploadPackageRequest::builder()
        .id("test-id")
        .file(file.path())
        .build()
        .unwrap();

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    Package::upload(&client, request).await.unwrap();

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains("name=\"bits\""));
    assert!(body.contains("test-content"));
}

#[tokio::test]
async fn test_upload_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/packages/test-id/upload"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(422).set_body_json(error_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let file = test_file();
    let request = UploadPackageRequest::builder()
        .file(file.path())
        .id("test-id")
        .build()
        .unwrap();

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Package::upload(&client, request).await.unwrap_err();

    assert_eq!(err.status_code(), Some(422));
}

#[tokio::test]
async fn test_upload_invalid_request() {
    let err = UploadPackageRequest::builder().build().unwrap_err();
    assert!(matches!(err, CfError::Validation { .. }));
}

#[tokio::test]
async fn test_upload_missing_file_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201).set_body_json(upload_response()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let request = UploadPackageRequest::builder()
        .id("test-id")
        .file("/nonexistent/cfapi/package.zip")
        .build()
        .unwrap();

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Package::upload(&client, request).await.unwrap_err();

    assert!(matches!(err, CfError::Io(_)));
}

#[tokio::test]
async fn test_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/packages/126e54c4-811d-4f7a-9a34-804130a75ab2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let package = Package::get(&client, "126e54c4-811d-4f7a-9a34-804130a75ab2".to_string())
        .await
        .unwrap();

    assert_eq!(package.state, PackageState::Ready);
}

#[tokio::test]
async fn test_get_not_found_v3_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/packages/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": [{"code": 10010, "title": "CF-ResourceNotFound", "detail": "Package not found"}]
        })))
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Package::get(&client, "missing".to_string()).await.unwrap_err();

    match err {
        CfError::ApiError {
            status_code,
            code,
            error_code,
            description,
        } => {
            assert_eq!(status_code, 404);
            assert_eq!(code, Some(10010));
            assert_eq!(error_code.as_deref(), Some("CF-ResourceNotFound"));
            assert_eq!(description, "Package not found");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v3/packages/test-id"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CfClient::new("test-token", &mock_server.uri()).unwrap();
    Package::delete(&client, "test-id".to_string()).await.unwrap();
}
