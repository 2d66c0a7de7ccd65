//! v2 buildpack endpoint handlers.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::space_quota_definitions::{paginate, ListQuery};
use super::{v2_error, SharedState};
use crate::mock_server::Fixtures;
use crate::Buildpack;

/// Body of a buildpack create request.
#[derive(Debug, Deserialize)]
pub struct CreateBuildpackBody {
    pub name: String,
    pub enabled: Option<bool>,
    pub filename: Option<String>,
    pub locked: Option<bool>,
    pub position: Option<u32>,
}

fn buildpack_not_found(id: &str) -> Response {
    v2_error(
        StatusCode::NOT_FOUND,
        10000,
        "CF-NotFound",
        &format!("The buildpack could not be found: {id}"),
    )
}

fn unreadable_upload(error: &MultipartError) -> Response {
    v2_error(
        StatusCode::BAD_REQUEST,
        1001,
        "CF-MessageParseError",
        &format!("Request invalid due to parse error: {error}"),
    )
}

/// POST /v2/buildpacks
pub async fn create_buildpack(
    State(state): State<SharedState>,
    Json(body): Json<CreateBuildpackBody>,
) -> Response {
    let mut state = state.write().await;

    if state.buildpacks.iter().any(|b| b.entity.name == body.name) {
        return v2_error(
            StatusCode::BAD_REQUEST,
            290001,
            "CF-BuildpackNameTaken",
            &format!("The buildpack name is already in use: {}", body.name),
        );
    }

    let id = state.next_guid();
    let position = body
        .position
        .unwrap_or(state.buildpacks.len() as u32 + 1);

    let mut buildpack = Fixtures::buildpack(&id, &body.name, position);
    buildpack.metadata.created_at = Some(Utc::now());
    buildpack.entity.enabled = Some(body.enabled.unwrap_or(true));
    buildpack.entity.locked = Some(body.locked.unwrap_or(false));
    buildpack.entity.filename = body.filename;

    state.buildpacks.push(buildpack.clone());
    (StatusCode::CREATED, Json(buildpack)).into_response()
}

/// GET /v2/buildpacks
pub async fn list_buildpacks(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    let all: Vec<&Buildpack> = state.buildpacks.iter().collect();

    (StatusCode::OK, Json(paginate("/v2/buildpacks", &all, &query))).into_response()
}

/// GET /v2/buildpacks/{id}
pub async fn get_buildpack(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let state = state.read().await;

    match state.get_buildpack(&id) {
        Some(buildpack) => (StatusCode::OK, Json(buildpack.clone())).into_response(),
        None => buildpack_not_found(&id),
    }
}

/// DELETE /v2/buildpacks/{id}
pub async fn delete_buildpack(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let mut state = state.write().await;

    if state.remove_buildpack(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        buildpack_not_found(&id)
    }
}

/// PUT /v2/buildpacks/{id}/bits
///
/// Expects the archive in a multipart field named `buildpack`.
pub async fn upload_buildpack_bits(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let mut filename = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("buildpack") {
                    filename = Some(field.file_name().unwrap_or("buildpack.zip").to_string());
                }
                if let Err(e) = field.bytes().await {
                    return unreadable_upload(&e);
                }
            }
            Ok(None) => break,
            Err(e) => return unreadable_upload(&e),
        }
    }

    let Some(filename) = filename else {
        return v2_error(
            StatusCode::BAD_REQUEST,
            290002,
            "CF-BuildpackBitsUploadInvalid",
            "The buildpack upload is invalid: a filename must be specified",
        );
    };

    let mut state = state.write().await;
    let Some(buildpack) = state.get_buildpack_mut(&id) else {
        return buildpack_not_found(&id);
    };

    if buildpack.entity.locked == Some(true) {
        return v2_error(
            StatusCode::CONFLICT,
            290003,
            "CF-BuildpackLocked",
            "The buildpack is locked",
        );
    }

    buildpack.entity.filename = Some(filename);
    buildpack.metadata.updated_at = Some(Utc::now());
    (StatusCode::CREATED, Json(buildpack.clone())).into_response()
}
