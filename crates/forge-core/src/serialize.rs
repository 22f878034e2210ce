//! Serialization gateway: YAML text out, files written.
//!
//! Output is block-style YAML with keys in insertion order, so a model
//! serializes the same way every time and reads like its template.

use std::path::Path;

use crate::document::Document;
use crate::error::SerializeError;

/// Serialize a document to YAML text.
///
/// # Errors
///
/// Returns [`SerializeError::Yaml`] if the document cannot be represented.
pub fn to_yaml_string(document: &Document) -> Result<String, SerializeError> {
    Ok(serde_yaml::to_string(document)?)
}

/// Serialize a document, returning an empty string (and logging) on failure.
#[must_use]
pub fn to_text(document: &Document) -> String {
    to_yaml_string(document).unwrap_or_else(|error| {
        tracing::warn!(%error, "error converting document to YAML string");
        String::new()
    })
}

/// Serialize `document` and write it to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`SerializeError`] if serialization or any filesystem step fails.
pub fn write_yaml(document: &Document, path: &Path) -> Result<(), SerializeError> {
    let text = to_yaml_string(document)?;
    let io_error = |source| SerializeError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, text).map_err(io_error)
}

/// Best-effort save: write the document to `path`, logging instead of failing.
///
/// Returns whether the file was written.
pub fn save(document: &Document, path: &Path) -> bool {
    match write_yaml(document, path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "generated YAML saved");
            true
        }
        Err(error) => {
            tracing::warn!(%error, "error saving YAML file");
            false
        }
    }
}
