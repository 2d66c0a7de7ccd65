//! Mock Cloud Foundry API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Cloud
//! Controller and UAA endpoints for integration and end-to-end testing.
//! Unlike wiremock which mocks at the HTTP level per-test, this server
//! maintains state across requests, enabling realistic workflow testing
//! (create a package, upload its bits, read it back).
//!
//! # Example
//!
//! ```ignore
//! use cfapi::mock_server::MockServer;
//! use cfapi::{CfClient, Package, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = CfClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let package = Package::get(&client, "test-package-id".to_string()).await.unwrap();
//!     assert!(package.link("upload").is_some());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{
    DefaultScenario, Fixtures, TEST_AUTHORIZATION_CODE, TEST_CLIENT_ID, TEST_CLIENT_SECRET,
    TEST_ORGANIZATION_ID,
};
pub use server::MockServer;
pub use state::MockState;
