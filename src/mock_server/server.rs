//! Mock Cloud Foundry API server.
//!
//! Provides an axum-based HTTP server that simulates the Cloud Controller
//! and UAA endpoints this crate binds.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers::{self, v2_error};
use super::state::MockState;

/// A mock Cloud Foundry API server for testing.
///
/// The server runs in the background and serves both the Cloud Controller
/// and UAA roots from the same address.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for package in scenario.packages {
            state = state.with_package(package);
        }

        for buildpack in scenario.buildpacks {
            state = state.with_buildpack(buildpack);
        }

        for definition in scenario.space_quota_definitions {
            state = state.with_space_quota_definition(definition);
        }

        for (client_id, client_secret) in scenario.uaa_clients {
            state = state.with_uaa_client(&client_id, &client_secret);
        }

        for code in scenario.authorization_codes {
            state = state.with_authorization_code(&code);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        let cloud_controller = Router::new()
            // v3 packages
            .route("/v3/apps/:app_id/packages", post(handlers::create_package))
            .route(
                "/v3/packages/:id",
                get(handlers::get_package).delete(handlers::delete_package),
            )
            .route("/v3/packages/:id/upload", post(handlers::upload_package))
            // v2 buildpacks
            .route(
                "/v2/buildpacks",
                get(handlers::list_buildpacks).post(handlers::create_buildpack),
            )
            .route(
                "/v2/buildpacks/:id",
                get(handlers::get_buildpack).delete(handlers::delete_buildpack),
            )
            .route("/v2/buildpacks/:id/bits", put(handlers::upload_buildpack_bits))
            // v2 space quota definitions
            .route(
                "/v2/organizations/:id/space_quota_definitions",
                get(handlers::list_organization_space_quota_definitions),
            )
            .route(
                "/v2/space_quota_definitions/:id",
                get(handlers::get_space_quota_definition),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

        Router::new()
            .merge(cloud_controller)
            // UAA
            .route("/oauth/token", post(handlers::issue_token))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Reject Cloud Controller requests without the configured bearer token.
async fn require_token(
    State(state): State<Arc<RwLock<MockState>>>,
    request: Request,
    next: Next,
) -> Response {
    let required = state.read().await.required_token.clone();

    if let Some(token) = required {
        let presented = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("bearer ").or_else(|| v.strip_prefix("Bearer ")));

        if presented != Some(token.as_str()) {
            return v2_error(
                StatusCode::UNAUTHORIZED,
                1000,
                "CF-InvalidAuthToken",
                "Invalid Auth Token",
            );
        }
    }

    next.run(request).await.into_response()
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
