//! Shapes shared by Cloud Controller resources.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named URL relation embedded in a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL.
    pub href: String,
    /// HTTP method to use when following the link, if not GET.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            method: None,
        }
    }
}

/// Links keyed by relation name (`self`, `app`, `upload`, ...).
pub type Links = BTreeMap<String, Link>;

/// Metadata block carried by every v2 resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// The resource GUID.
    #[serde(rename = "guid")]
    pub id: String,

    /// Path of the resource relative to the API root.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A v2 resource: server metadata plus the entity payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<E> {
    pub metadata: Metadata,
    pub entity: E,
}

impl<E> Resource<E> {
    /// The resource GUID.
    pub fn id(&self) -> &str {
        &self.metadata.id
    }
}
