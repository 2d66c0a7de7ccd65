//! Cloud Foundry API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Higher-level operations are implemented via traits on resource types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{CfError, Result};

const DEFAULT_API_URL: &str = "https://api.run.pivotal.io";
const USER_AGENT: &str = concat!("cfapi/", env!("CARGO_PKG_VERSION"));

/// Low-level Cloud Foundry API client.
///
/// Talks to two roots: the Cloud Controller (`api_url`, bearer-authenticated)
/// and UAA (`uaa_url`, used for token exchange). Resource-specific operations
/// are implemented via the `Get`, `List`, `Create` and `Delete` traits on
/// model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use cfapi::CfClient;
///
/// # fn example() -> cfapi::Result<()> {
/// // Create from environment variables
/// let client = CfClient::from_env()?;
///
/// // Or configure manually
/// let client = CfClient::new("access-token", "https://api.run.pivotal.io")?
///     .with_uaa_url("https://uaa.run.pivotal.io")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CfClient {
    http: Client,
    api_url: Arc<Url>,
    uaa_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for CfClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CfClient")
            .field("api_url", &self.api_url.as_str())
            .field("uaa_url", &self.uaa_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CfClient {
    /// Create a client from environment variables.
    ///
    /// Uses `CF_ACCESS_TOKEN` for authentication, `CF_API_URL` for the Cloud
    /// Controller (defaults to `https://api.run.pivotal.io`) and `CF_UAA_URL`
    /// for UAA (derived from the API URL when unset).
    ///
    /// # Errors
    ///
    /// Returns an error if `CF_ACCESS_TOKEN` is not set or a URL is invalid.
    pub fn from_env() -> Result<Self> {
        let token = env::var("CF_ACCESS_TOKEN").map_err(|_| {
            CfError::ConfigMissing("CF_ACCESS_TOKEN environment variable not set".to_string())
        })?;

        let api_url = env::var("CF_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let client = Self::new(&token, &api_url)?;

        match env::var("CF_UAA_URL") {
            Ok(uaa_url) => client.with_uaa_url(&uaa_url),
            Err(_) => Ok(client),
        }
    }

    /// Create a new client with the provided token and Cloud Controller URL.
    ///
    /// The UAA root is derived from `api_url`: a leading `api.` host label is
    /// replaced by `uaa.`; otherwise the API root is reused.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, api_url: &str) -> Result<Self> {
        let api_url = parse_root(api_url)?;
        let uaa_url = derive_uaa_url(&api_url);

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(CfError::HttpError)?;

        Ok(Self {
            http,
            api_url: Arc::new(api_url),
            uaa_url: Arc::new(uaa_url),
            token: token.to_string(),
        })
    }

    /// Override the UAA root URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_uaa_url(mut self, uaa_url: &str) -> Result<Self> {
        self.uaa_url = Arc::new(parse_root(uaa_url)?);
        Ok(self)
    }

    /// The Cloud Controller root URL.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// The UAA root URL.
    pub fn uaa_url(&self) -> &Url {
        &self.uaa_url
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.api_url.join(path)?;
        self.send(self.http.get(url).bearer_auth(&self.token)).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.api_url.join(path)?;
        self.send(self.http.get(url).bearer_auth(&self.token).query(query))
            .await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.api_url.join(path)?;
        self.send(self.http.post(url).bearer_auth(&self.token).json(body))
            .await
    }

    /// Make a POST request with a `multipart/form-data` body.
    #[tracing::instrument(skip(self, form))]
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<Response> {
        let url = self.api_url.join(path)?;
        self.send(self.http.post(url).bearer_auth(&self.token).multipart(form))
            .await
    }

    /// Make a PUT request with a `multipart/form-data` body.
    #[tracing::instrument(skip(self, form))]
    pub async fn put_multipart(&self, path: &str, form: Form) -> Result<Response> {
        let url = self.api_url.join(path)?;
        self.send(self.http.put(url).bearer_auth(&self.token).multipart(form))
            .await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.api_url.join(path)?;
        self.send(self.http.delete(url).bearer_auth(&self.token))
            .await
    }

    /// Make an unauthenticated POST to UAA with all parameters in the query string.
    #[tracing::instrument(skip(self, query))]
    pub async fn uaa_post_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.uaa_url.join(path)?;
        self.send(
            self.http
                .post(url)
                .header(ACCEPT, "application/json")
                .query(query),
        )
        .await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(CfError::HttpError)?;
        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = CfError::from_response_body(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), error = %err, "request failed");
        Err(err)
    }
}

/// Read a success response body and decode it as JSON.
///
/// Transport failures while reading stay [`CfError::HttpError`]; a body that
/// does not match `T` becomes [`CfError::ParseError`].
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Parse a root URL, ensuring it ends with `/` so relative paths join beneath it.
fn parse_root(base_url: &str) -> Result<Url> {
    let base_url = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    };

    Ok(Url::parse(&base_url)?)
}

fn derive_uaa_url(api_url: &Url) -> Url {
    let Some(rest) = api_url.host_str().and_then(|h| h.strip_prefix("api.")) else {
        return api_url.clone();
    };

    let mut uaa_url = api_url.clone();
    match uaa_url.set_host(Some(&format!("uaa.{rest}"))) {
        Ok(()) => uaa_url,
        Err(_) => api_url.clone(),
    }
}
