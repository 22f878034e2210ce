//! Document store accessor.
//!
//! [`read_document`] reports every outcome explicitly. [`load_document`] is the
//! forgiving variant used by the catalog and pipeline: a missing or malformed
//! file becomes an empty mapping plus a warning.

use std::io::ErrorKind;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::DocumentError;

/// A parsed YAML document. Mappings keep their source key order.
pub type Document = Value;

/// An empty mapping, the "nothing loaded" document.
#[must_use]
pub fn empty_document() -> Document {
    Value::Mapping(Mapping::new())
}

/// Whether a document carries no content at all.
///
/// Null, an empty mapping, an empty sequence and an empty string all count as
/// empty. Scalars with a value do not.
#[must_use]
pub fn is_empty_document(document: &Document) -> bool {
    match document {
        Value::Null => true,
        Value::Mapping(map) => map.is_empty(),
        Value::Sequence(items) => items.is_empty(),
        Value::String(text) => text.is_empty(),
        Value::Tagged(tagged) => is_empty_document(&tagged.value),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Read and parse the YAML file at `path`.
///
/// A file that is empty (or whitespace only) parses to an empty mapping.
///
/// # Errors
///
/// Returns [`DocumentError::NotFound`] if the file does not exist,
/// [`DocumentError::Io`] if it cannot be read, and [`DocumentError::Parse`]
/// if the contents are not valid YAML.
pub fn read_document(path: &Path) -> Result<Document, DocumentError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return Err(DocumentError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(DocumentError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if text.trim().is_empty() {
        return Ok(empty_document());
    }

    serde_yaml::from_str(&text).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a YAML document, falling back to an empty mapping on any failure.
///
/// Never fails. Each fallback is logged at `warn` so callers can decide
/// whether an empty result should escalate.
#[must_use]
pub fn load_document(path: &Path) -> Document {
    match read_document(path) {
        Ok(document) => document,
        Err(DocumentError::NotFound { path }) => {
            tracing::warn!(path = %path.display(), "file not found");
            empty_document()
        }
        Err(error) => {
            tracing::warn!(%error, "error loading YAML document");
            empty_document()
        }
    }
}
