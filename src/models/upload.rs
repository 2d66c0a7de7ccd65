//! Multipart bodies for bits uploads.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::error::{CfError, Result};

/// Build a single-field multipart form carrying the contents of `file`.
///
/// The file is read eagerly so that a missing or unreadable file fails
/// before any request is sent.
pub(crate) async fn file_form(field: &'static str, file: &Path, filename: Option<&str>) -> Result<Form> {
    let bytes = tokio::fs::read(file).await?;
    let filename = filename
        .map(str::to_string)
        .or_else(|| file.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| field.to_string());

    tracing::debug!(field, filename = %filename, size = bytes.len(), "attaching file");

    let part = Part::bytes(bytes)
        .file_name(filename)
        .mime_str("application/octet-stream")
        .map_err(CfError::HttpError)?;

    Ok(Form::new().part(field, part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = file_form("bits", Path::new("/nonexistent/cfapi/bits.zip"), None).await;
        assert!(matches!(result, Err(CfError::Io(_))));
    }

    #[tokio::test]
    async fn test_form_has_multipart_boundary() {
        let file = tempfile::NamedTempFile::new().unwrap();
        tokio::fs::write(file.path(), b"test-content").await.unwrap();

        let form = file_form("bits", file.path(), None).await.unwrap();
        assert!(!form.boundary().is_empty());
    }
}
