//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{TimeZone, Utc};

use crate::{
    Buildpack, BuildpackEntity, Hash, Link, Links, Metadata, Package, PackageState, PackageType,
    SpaceQuotaDefinition, SpaceQuotaDefinitionEntity,
};

/// Organization that owns the default space quota definitions.
pub const TEST_ORGANIZATION_ID: &str = "test-organization-id";

/// UAA client registered in the default scenario.
pub const TEST_CLIENT_ID: &str = "test-client-id";
pub const TEST_CLIENT_SECRET: &str = "test-client-secret";

/// OpenID authorization code registered in the default scenario.
pub const TEST_AUTHORIZATION_CODE: &str = "test-authorization-code";

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// Data the default mock server starts with.
pub struct DefaultScenario {
    pub packages: Vec<Package>,
    pub buildpacks: Vec<Buildpack>,
    pub space_quota_definitions: Vec<SpaceQuotaDefinition>,
    pub uaa_clients: Vec<(String, String)>,
    pub authorization_codes: Vec<String>,
}

impl Fixtures {
    // =========================================================================
    // Package Fixtures
    // =========================================================================

    /// Links every package carries.
    pub fn package_links(id: &str, application_id: &str) -> Links {
        let mut links = Links::new();
        links.insert("self".to_string(), Link::new(format!("/v3/packages/{id}")));
        links.insert(
            "app".to_string(),
            Link::new(format!("/v3/apps/{application_id}")),
        );
        links
    }

    /// Create a ready docker package.
    pub fn docker_package(id: &str, application_id: &str, url: &str) -> Package {
        Package {
            id: id.to_string(),
            package_type: PackageType::Docker,
            state: PackageState::Ready,
            url: Some(url.to_string()),
            hash: Hash {
                hash_type: "sha1".to_string(),
                value: None,
            },
            error: None,
            created_at: Utc.with_ymd_and_hms(2015, 8, 6, 0, 36, 55).single(),
            updated_at: None,
            links: Self::package_links(id, application_id),
        }
    }

    /// Create a bits package waiting for its upload.
    pub fn bits_package(id: &str, application_id: &str) -> Package {
        let mut links = Self::package_links(id, application_id);
        links.insert(
            "upload".to_string(),
            Link {
                href: format!("/v3/packages/{id}/upload"),
                method: Some("POST".to_string()),
            },
        );

        Package {
            id: id.to_string(),
            package_type: PackageType::Bits,
            state: PackageState::AwaitingUpload,
            url: None,
            hash: Hash {
                hash_type: "sha1".to_string(),
                value: None,
            },
            error: None,
            created_at: Utc.with_ymd_and_hms(2015, 8, 6, 0, 36, 54).single(),
            updated_at: None,
            links,
        }
    }

    // =========================================================================
    // Buildpack Fixtures
    // =========================================================================

    /// Create an enabled, unlocked buildpack without bits.
    pub fn buildpack(id: &str, name: &str, position: u32) -> Buildpack {
        Buildpack {
            metadata: Self::metadata("buildpacks", id),
            entity: BuildpackEntity {
                name: name.to_string(),
                position: Some(position),
                enabled: Some(true),
                locked: Some(false),
                filename: None,
            },
        }
    }

    // =========================================================================
    // Space Quota Fixtures
    // =========================================================================

    /// Create a space quota definition with typical limits.
    pub fn space_quota_definition(id: &str, name: &str, organization_id: &str) -> SpaceQuotaDefinition {
        SpaceQuotaDefinition {
            metadata: Self::metadata("space_quota_definitions", id),
            entity: SpaceQuotaDefinitionEntity {
                name: name.to_string(),
                organization_id: organization_id.to_string(),
                non_basic_services_allowed: Some(true),
                total_services: Some(10),
                total_routes: Some(100),
                memory_limit: Some(10240),
                instance_memory_limit: Some(-1),
                app_instance_limit: Some(-1),
                app_task_limit: Some(5),
                total_service_keys: Some(-1),
                total_reserved_route_ports: Some(0),
            },
        }
    }

    fn metadata(collection: &str, id: &str) -> Metadata {
        Metadata {
            id: id.to_string(),
            url: Some(format!("/v2/{collection}/{id}")),
            created_at: Utc.with_ymd_and_hms(2016, 3, 17, 21, 41, 29).single(),
            updated_at: None,
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Create a default scenario with common test data.
    ///
    /// Includes:
    /// - A ready docker package and a bits package awaiting upload
    /// - Two buildpacks
    /// - Three space quota definitions in [`TEST_ORGANIZATION_ID`]
    /// - One UAA client and one authorization code
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            packages: vec![
                Self::docker_package(
                    "126e54c4-811d-4f7a-9a34-804130a75ab2",
                    "test-application-id",
                    "docker://cloudfoundry/runtime-ci",
                ),
                Self::bits_package("test-package-id", "test-application-id"),
            ],
            buildpacks: vec![
                Self::buildpack("test-buildpack-id-1", "java_buildpack", 1),
                Self::buildpack("test-buildpack-id-2", "go_buildpack", 2),
            ],
            space_quota_definitions: vec![
                Self::space_quota_definition("test-quota-id-1", "small", TEST_ORGANIZATION_ID),
                Self::space_quota_definition("test-quota-id-2", "medium", TEST_ORGANIZATION_ID),
                Self::space_quota_definition("test-quota-id-3", "large", TEST_ORGANIZATION_ID),
            ],
            uaa_clients: vec![(TEST_CLIENT_ID.to_string(), TEST_CLIENT_SECRET.to_string())],
            authorization_codes: vec![TEST_AUTHORIZATION_CODE.to_string()],
        }
    }
}
