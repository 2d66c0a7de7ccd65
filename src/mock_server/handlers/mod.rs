//! HTTP request handlers for the mock server.

pub mod buildpacks;
pub mod packages;
pub mod space_quota_definitions;
pub mod tokens;

pub use buildpacks::*;
pub use packages::*;
pub use space_quota_definitions::*;
pub use tokens::*;

use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

pub(crate) type SharedState = Arc<RwLock<MockState>>;

/// A Cloud Controller v2 error envelope.
pub(crate) fn v2_error(status: StatusCode, code: i64, error_code: &str, description: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "code": code,
            "description": description,
            "error_code": error_code
        })),
    )
        .into_response()
}

/// A Cloud Controller v3 error envelope.
pub(crate) fn v3_error(status: StatusCode, code: i64, title: &str, detail: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "errors": [{"code": code, "title": title, "detail": detail}]
        })),
    )
        .into_response()
}
