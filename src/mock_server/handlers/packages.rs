//! v3 package endpoint handlers.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::{v3_error, SharedState};
use crate::mock_server::Fixtures;
use crate::{Hash, Link, Package, PackageState, PackageType};

/// Body of a package create request.
#[derive(Debug, Deserialize)]
pub struct CreatePackageBody {
    #[serde(rename = "type")]
    pub package_type: PackageType,
    pub url: Option<String>,
}

fn package_not_found(id: &str) -> Response {
    v3_error(
        StatusCode::NOT_FOUND,
        10010,
        "CF-ResourceNotFound",
        &format!("Package not found: {id}"),
    )
}

fn unreadable_upload(error: &MultipartError) -> Response {
    v3_error(
        StatusCode::BAD_REQUEST,
        1001,
        "CF-MessageParseError",
        &format!("Request invalid due to parse error: {error}"),
    )
}

/// POST /v3/apps/{app_id}/packages
pub async fn create_package(
    State(state): State<SharedState>,
    Path(app_id): Path<String>,
    Json(body): Json<CreatePackageBody>,
) -> Response {
    if body.package_type == PackageType::Docker && body.url.is_none() {
        return v3_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            10008,
            "CF-UnprocessableEntity",
            "The request is semantically invalid: url required for docker packages",
        );
    }

    let mut state = state.write().await;
    let id = state.next_guid();

    let package = match body.url {
        Some(url) => Fixtures::docker_package(&id, &app_id, &url),
        None => Fixtures::bits_package(&id, &app_id),
    };
    let package = Package {
        created_at: Some(Utc::now()),
        ..package
    };

    state.packages.insert(id, package.clone());
    (StatusCode::CREATED, Json(package)).into_response()
}

/// GET /v3/packages/{id}
pub async fn get_package(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let state = state.read().await;

    match state.get_package(&id) {
        Some(package) => (StatusCode::OK, Json(package.clone())).into_response(),
        None => package_not_found(&id),
    }
}

/// DELETE /v3/packages/{id}
pub async fn delete_package(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let mut state = state.write().await;

    match state.packages.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => package_not_found(&id),
    }
}

/// POST /v3/packages/{id}/upload
///
/// Expects the archive in a multipart field named `bits`.
pub async fn upload_package(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let mut received = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("bits") => match field.bytes().await {
                Ok(bytes) => received = Some(bytes),
                Err(e) => return unreadable_upload(&e),
            },
            Ok(Some(_)) => {}
            Ok(None) => break,
            Err(e) => return unreadable_upload(&e),
        }
    }

    let Some(bits) = received else {
        return v3_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            10008,
            "CF-UnprocessableEntity",
            "The request is semantically invalid: bits field missing",
        );
    };

    let mut state = state.write().await;
    let Some(package) = state.packages.get_mut(&id) else {
        return package_not_found(&id);
    };

    if package.package_type != PackageType::Bits {
        return v3_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            10008,
            "CF-UnprocessableEntity",
            "Package type must be bits.",
        );
    }

    package.state = PackageState::ProcessingUpload;
    package.hash = Hash {
        hash_type: "sha1".to_string(),
        value: None,
    };
    package.updated_at = Some(Utc::now());
    package
        .links
        .entry("upload".to_string())
        .or_insert_with(|| Link::new(format!("/v3/packages/{id}/upload")));
    package
        .links
        .insert("download".to_string(), Link::new(format!("/v3/packages/{id}/download")));
    package
        .links
        .insert("stage".to_string(), Link::new(format!("/v3/packages/{id}/droplets")));

    tracing::debug!(package = %id, size = bits.len(), "received package bits");
    (StatusCode::CREATED, Json(package.clone())).into_response()
}
