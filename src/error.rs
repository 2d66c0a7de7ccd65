//! Error types for Cloud Foundry API operations.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during Cloud Foundry API operations.
#[derive(Debug, Error)]
pub enum CfError {
    /// Configuration is missing or incomplete.
    #[error("Cloud Foundry configuration required: {0}")]
    ConfigMissing(String),

    /// A request was built without one or more of its required fields.
    #[error("{request} is missing required field(s): {}", missing.join(", "))]
    Validation {
        request: &'static str,
        missing: Vec<&'static str>,
    },

    /// A named lookup found no matching resource.
    #[error("{entity_type} {name} does not exist")]
    NotFound {
        entity_type: &'static str,
        name: String,
    },

    /// The platform answered with a non-2xx status.
    #[error("Cloud Foundry API error (HTTP {status_code}): {description}")]
    ApiError {
        status_code: u16,
        /// Numeric platform error code (e.g. `10008`), when present.
        code: Option<i64>,
        /// Symbolic platform error code (e.g. `CF-UnprocessableEntity`), when present.
        error_code: Option<String>,
        description: String,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// A file named by an upload request could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CfError {
    /// Build a validation error from `(field, is_missing)` pairs.
    pub(crate) fn missing_fields(request: &'static str, fields: &[(&'static str, bool)]) -> Self {
        CfError::Validation {
            request,
            missing: fields
                .iter()
                .filter(|(_, missing)| *missing)
                .map(|(name, _)| *name)
                .collect(),
        }
    }

    /// Build an API error from a status code and the raw response body.
    ///
    /// Understands the v2 envelope (`code`, `description`, `error_code`),
    /// the v3 envelope (`errors: [{code, title, detail}]`) and the UAA
    /// envelope (`error`, `error_description`). Any other body becomes the
    /// description verbatim.
    pub(crate) fn from_response_body(status_code: u16, body: &str) -> Self {
        let envelope = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => envelope,
            Err(_) => {
                let description = if body.trim().is_empty() {
                    format!("HTTP {status_code}")
                } else {
                    body.to_string()
                };
                return CfError::ApiError {
                    status_code,
                    code: None,
                    error_code: None,
                    description,
                };
            }
        };

        if let Some(first) = envelope.errors.into_iter().next() {
            return CfError::ApiError {
                status_code,
                code: first.code,
                error_code: first.title,
                description: first.detail.unwrap_or_else(|| format!("HTTP {status_code}")),
            };
        }

        let description = envelope
            .description
            .or(envelope.error_description)
            .or_else(|| envelope.error.clone())
            .unwrap_or_else(|| body.to_string());

        CfError::ApiError {
            status_code,
            code: envelope.code,
            error_code: envelope.error_code.or(envelope.error),
            description,
        }
    }

    /// HTTP status of an [`CfError::ApiError`], if this is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CfError::ApiError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Union of the Cloud Controller v2, v3 and UAA error bodies.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    errors: Vec<V3Error>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct V3Error {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Result type alias for Cloud Foundry operations.
pub type Result<T> = core::result::Result<T, CfError>;
