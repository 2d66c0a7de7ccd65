//! UAA token endpoint handler.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::SharedState;
use crate::TokenResponse;

/// Query parameters accepted by the token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub grant_type: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub code: Option<String>,
    #[allow(dead_code)] // Accepted by UAA but not checked by the mock
    pub redirect_uri: Option<String>,
    pub token_format: Option<String>,
}

fn uaa_error(status: StatusCode, error: &str, description: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": error,
            "error_description": description
        })),
    )
        .into_response()
}

/// POST /oauth/token
pub async fn issue_token(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
) -> Response {
    let mut state = state.write().await;

    let client_id = query.client_id.as_deref().unwrap_or_default();
    let client_secret = query.client_secret.as_deref().unwrap_or_default();
    if !state.client_authenticates(client_id, client_secret) {
        return uaa_error(StatusCode::UNAUTHORIZED, "unauthorized", "Bad credentials");
    }

    let jti = state.next_guid();
    let opaque = query.token_format.as_deref() == Some("opaque");
    let access_token = if opaque {
        jti.replace('-', "")
    } else {
        format!("eyJhbGciOiJSUzI1NiJ9.{jti}.signature")
    };

    let token = match query.grant_type.as_str() {
        "authorization_code" => {
            let code = query.code.unwrap_or_default();
            if !state.authorization_codes.remove(&code) {
                return uaa_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_grant",
                    &format!("Invalid authorization code: {code}"),
                );
            }
            TokenResponse {
                access_token,
                token_type: "bearer".to_string(),
                id_token: Some(format!("id-token-{jti}")),
                refresh_token: Some(format!("{jti}-r")),
                expires_in: Some(43199),
                scope: Some("openid oauth.approvals".to_string()),
                jti: Some(jti),
            }
        }
        "client_credentials" => TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            id_token: None,
            refresh_token: None,
            expires_in: Some(43199),
            scope: Some("uaa.none".to_string()),
            jti: Some(jti),
        },
        other => {
            return uaa_error(
                StatusCode::BAD_REQUEST,
                "unsupported_grant_type",
                &format!("Unsupported grant type: {other}"),
            )
        }
    };

    (StatusCode::OK, Json(token)).into_response()
}
