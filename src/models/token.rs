//! UAA token requests and responses.

use serde::{Deserialize, Serialize};

use crate::client::{decode, CfClient};
use crate::error::{CfError, Result};

const TOKEN_PATH: &str = "oauth/token";

/// Format of the issued access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenFormat {
    Opaque,
    Jwt,
}

/// Exchange an OpenID authorization code for tokens.
///
/// All fields travel as query parameters.
#[derive(Clone, PartialEq, Serialize)]
pub struct GetTokenByOpenIdRequest {
    #[serde(rename = "code")]
    pub authorization_code: String,

    #[serde(rename = "client_id")]
    pub client_id: String,

    #[serde(rename = "client_secret")]
    pub client_secret: String,

    #[serde(rename = "redirect_uri", skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,

    #[serde(rename = "token_format", skip_serializing_if = "Option::is_none")]
    pub token_format: Option<TokenFormat>,
}

impl std::fmt::Debug for GetTokenByOpenIdRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetTokenByOpenIdRequest")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("token_format", &self.token_format)
            .finish_non_exhaustive()
    }
}

impl GetTokenByOpenIdRequest {
    pub fn builder() -> GetTokenByOpenIdRequestBuilder {
        GetTokenByOpenIdRequestBuilder::default()
    }
}

/// Builder for [`GetTokenByOpenIdRequest`].
#[derive(Clone, Default)]
pub struct GetTokenByOpenIdRequestBuilder {
    authorization_code: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    token_format: Option<TokenFormat>,
}

impl GetTokenByOpenIdRequestBuilder {
    pub fn authorization_code(mut self, authorization_code: impl Into<String>) -> Self {
        self.authorization_code = Some(authorization_code.into());
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn token_format(mut self, token_format: TokenFormat) -> Self {
        self.token_format = Some(token_format);
        self
    }

    /// Build the request.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::Validation`] if the authorization code, client id
    /// or client secret is missing.
    pub fn build(self) -> Result<GetTokenByOpenIdRequest> {
        match (self.authorization_code, self.client_id, self.client_secret) {
            (Some(authorization_code), Some(client_id), Some(client_secret)) => {
                Ok(GetTokenByOpenIdRequest {
                    authorization_code,
                    client_id,
                    client_secret,
                    redirect_uri: self.redirect_uri,
                    token_format: self.token_format,
                })
            }
            (authorization_code, client_id, client_secret) => Err(CfError::missing_fields(
                "GetTokenByOpenIdRequest",
                &[
                    ("authorization_code", authorization_code.is_none()),
                    ("client_id", client_id.is_none()),
                    ("client_secret", client_secret.is_none()),
                ],
            )),
        }
    }
}

/// Obtain a token for a client acting on its own behalf.
#[derive(Clone, PartialEq, Serialize)]
pub struct GetTokenByClientCredentialsRequest {
    pub client_id: String,

    pub client_secret: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_format: Option<TokenFormat>,
}

impl std::fmt::Debug for GetTokenByClientCredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetTokenByClientCredentialsRequest")
            .field("client_id", &self.client_id)
            .field("token_format", &self.token_format)
            .finish_non_exhaustive()
    }
}

impl GetTokenByClientCredentialsRequest {
    pub fn builder() -> GetTokenByClientCredentialsRequestBuilder {
        GetTokenByClientCredentialsRequestBuilder::default()
    }
}

/// Builder for [`GetTokenByClientCredentialsRequest`].
#[derive(Clone, Default)]
pub struct GetTokenByClientCredentialsRequestBuilder {
    client_id: Option<String>,
    client_secret: Option<String>,
    token_format: Option<TokenFormat>,
}

impl GetTokenByClientCredentialsRequestBuilder {
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    pub fn token_format(mut self, token_format: TokenFormat) -> Self {
        self.token_format = Some(token_format);
        self
    }

    /// Build the request.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::Validation`] if the client id or secret is missing.
    pub fn build(self) -> Result<GetTokenByClientCredentialsRequest> {
        match (self.client_id, self.client_secret) {
            (Some(client_id), Some(client_secret)) => Ok(GetTokenByClientCredentialsRequest {
                client_id,
                client_secret,
                token_format: self.token_format,
            }),
            (client_id, client_secret) => Err(CfError::missing_fields(
                "GetTokenByClientCredentialsRequest",
                &[
                    ("client_id", client_id.is_none()),
                    ("client_secret", client_secret.is_none()),
                ],
            )),
        }
    }
}

/// Tokens issued by UAA.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    /// Usually `bearer`.
    pub token_type: String,

    #[serde(default)]
    pub id_token: Option<String>,

    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,

    /// Space-separated granted scopes.
    #[serde(default)]
    pub scope: Option<String>,

    /// Token identifier.
    #[serde(default)]
    pub jti: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("jti", &self.jti)
            .finish_non_exhaustive()
    }
}

impl TokenResponse {
    /// The granted scopes as a list.
    pub fn scopes(&self) -> Vec<&str> {
        self.scope
            .as_deref()
            .map(|s| s.split_whitespace().collect())
            .unwrap_or_default()
    }
}

/// Query parameters for the token endpoint: the grant plus the request's own keys.
#[derive(Serialize)]
struct TokenParams<'a, R> {
    grant_type: &'static str,
    response_type: &'static str,
    #[serde(flatten)]
    request: &'a R,
}

/// Exchange an OpenID authorization code for an access token and ID token.
///
/// # Errors
///
/// Returns an API error carrying UAA's `error`/`error_description` if the
/// code or client credentials are rejected.
#[tracing::instrument(skip(client))]
pub async fn get_token_by_open_id(
    client: &CfClient,
    request: &GetTokenByOpenIdRequest,
) -> Result<TokenResponse> {
    let params = TokenParams {
        grant_type: "authorization_code",
        response_type: "id_token",
        request,
    };

    let response = client.uaa_post_query(TOKEN_PATH, &params).await?;
    let token: TokenResponse = decode(response).await?;
    Ok(token)
}

/// Obtain an access token with the client credentials grant.
///
/// # Errors
///
/// Returns an API error if UAA rejects the client credentials.
#[tracing::instrument(skip(client))]
pub async fn get_token_by_client_credentials(
    client: &CfClient,
    request: &GetTokenByClientCredentialsRequest,
) -> Result<TokenResponse> {
    let params = TokenParams {
        grant_type: "client_credentials",
        response_type: "token",
        request,
    };

    let response = client.uaa_post_query(TOKEN_PATH, &params).await?;
    let token: TokenResponse = decode(response).await?;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_id_request() -> GetTokenByOpenIdRequest {
        GetTokenByOpenIdRequest::builder()
            .authorization_code("test-authorization-code")
            .client_id("test-client-id")
            .client_secret("test-client-secret")
            .redirect_uri("https://uaa.cloudfoundry.com/redirect/cf")
            .token_format(TokenFormat::Opaque)
            .build()
            .unwrap()
    }

    #[test]
    fn test_open_id_query_keys() {
        let request = open_id_request();
        let params = TokenParams {
            grant_type: "authorization_code",
            response_type: "id_token",
            request: &request,
        };
        let serialized = serde_qs::to_string(&params).expect("Failed to serialize query");

        assert!(serialized.contains("grant_type=authorization_code"));
        assert!(serialized.contains("response_type=id_token"));
        assert!(serialized.contains("code=test-authorization-code"));
        assert!(serialized.contains("client_id=test-client-id"));
        assert!(serialized.contains("client_secret=test-client-secret"));
        assert!(serialized.contains("redirect_uri="));
        assert!(serialized.contains("token_format=opaque"));
        assert!(!serialized.contains("authorization_code="));
    }

    #[test]
    fn test_open_id_optional_keys_omitted() {
        let request = GetTokenByOpenIdRequest::builder()
            .authorization_code("code")
            .client_id("id")
            .client_secret("secret")
            .build()
            .unwrap();
        let serialized = serde_qs::to_string(&request).unwrap();

        assert!(!serialized.contains("redirect_uri"));
        assert!(!serialized.contains("token_format"));
    }

    #[test]
    fn test_open_id_missing_fields() {
        let err = GetTokenByOpenIdRequest::builder()
            .client_id("id")
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "GetTokenByOpenIdRequest is missing required field(s): authorization_code, client_secret"
        );
    }

    #[test]
    fn test_client_credentials_missing_secret() {
        let err = GetTokenByClientCredentialsRequest::builder()
            .client_id("id")
            .build()
            .unwrap_err();
        assert!(matches!(err, CfError::Validation { ref missing, .. } if missing == &vec!["client_secret"]));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let debug = format!("{:?}", open_id_request());
        assert!(debug.contains("test-client-id"));
        assert!(!debug.contains("test-client-secret"));
        assert!(!debug.contains("test-authorization-code"));
    }

    #[test]
    fn test_token_response_deserialize() {
        let json = r#"{
            "access_token": "test-access-token",
            "token_type": "bearer",
            "id_token": "test-id-token",
            "refresh_token": "test-refresh-token",
            "expires_in": 43199,
            "scope": "openid oauth.approvals",
            "jti": "test-jti"
        }"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();

        assert_eq!(token.access_token, "test-access-token");
        assert_eq!(token.id_token.as_deref(), Some("test-id-token"));
        assert_eq!(token.expires_in, Some(43199));
        assert_eq!(token.scopes(), vec!["openid", "oauth.approvals"]);
        assert!(!format!("{token:?}").contains("test-access-token"));
    }
}
