//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Cloud Foundry server.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Buildpack, Package, SpaceQuotaDefinition};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// v3 packages indexed by GUID.
    pub packages: HashMap<String, Package>,

    /// v2 buildpacks in listing order.
    pub buildpacks: Vec<Buildpack>,

    /// v2 space quota definitions in listing order.
    pub space_quota_definitions: Vec<SpaceQuotaDefinition>,

    /// UAA clients: client id to client secret.
    pub uaa_clients: HashMap<String, String>,

    /// Outstanding single-use OpenID authorization codes.
    pub authorization_codes: HashSet<String>,

    /// Optional bearer token. If set, Cloud Controller requests must carry it.
    pub required_token: Option<String>,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a package to the state.
    pub fn with_package(mut self, package: Package) -> Self {
        self.packages.insert(package.id.clone(), package);
        self
    }

    /// Add a buildpack to the state.
    pub fn with_buildpack(mut self, buildpack: Buildpack) -> Self {
        self.buildpacks.push(buildpack);
        self
    }

    /// Add a space quota definition to the state.
    pub fn with_space_quota_definition(mut self, definition: SpaceQuotaDefinition) -> Self {
        self.space_quota_definitions.push(definition);
        self
    }

    /// Register a UAA client.
    pub fn with_uaa_client(mut self, client_id: &str, client_secret: &str) -> Self {
        self.uaa_clients
            .insert(client_id.to_string(), client_secret.to_string());
        self
    }

    /// Register an OpenID authorization code that can be exchanged once.
    pub fn with_authorization_code(mut self, code: &str) -> Self {
        self.authorization_codes.insert(code.to_string());
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Generate a fresh GUID-shaped identifier.
    pub fn next_guid(&mut self) -> String {
        self.next_id += 1;
        format!("{:08x}-0000-4000-8000-{:012x}", self.next_id, self.next_id)
    }

    /// Get a package by GUID.
    pub fn get_package(&self, id: &str) -> Option<&Package> {
        self.packages.get(id)
    }

    /// Get a buildpack by GUID.
    pub fn get_buildpack(&self, id: &str) -> Option<&Buildpack> {
        self.buildpacks.iter().find(|b| b.id() == id)
    }

    /// Get a mutable buildpack by GUID.
    pub fn get_buildpack_mut(&mut self, id: &str) -> Option<&mut Buildpack> {
        self.buildpacks.iter_mut().find(|b| b.id() == id)
    }

    /// Remove a buildpack, returning whether it existed.
    pub fn remove_buildpack(&mut self, id: &str) -> bool {
        let before = self.buildpacks.len();
        self.buildpacks.retain(|b| b.id() != id);
        self.buildpacks.len() != before
    }

    /// Get a space quota definition by GUID.
    pub fn get_space_quota_definition(&self, id: &str) -> Option<&SpaceQuotaDefinition> {
        self.space_quota_definitions.iter().find(|d| d.id() == id)
    }

    /// List space quota definitions owned by an organization, in insertion order.
    pub fn list_space_quota_definitions(&self, organization_id: &str) -> Vec<&SpaceQuotaDefinition> {
        self.space_quota_definitions
            .iter()
            .filter(|d| d.entity.organization_id == organization_id)
            .collect()
    }

    /// Check a client id/secret pair.
    pub fn client_authenticates(&self, client_id: &str, client_secret: &str) -> bool {
        self.uaa_clients
            .get(client_id)
            .map_or(false, |secret| secret == client_secret)
    }
}
