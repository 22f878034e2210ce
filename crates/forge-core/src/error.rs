//! Error types for the semantic model pipeline.
//!
//! Only template absence is fatal. Catalog loading and resolution never fail,
//! and the best-effort wrappers in [`crate::document`] and [`crate::serialize`]
//! turn the errors below into log lines at their own boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a structured document from disk.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// No file exists at the requested path.
    #[error("document not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contents are not valid YAML.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors raised by the model assembler.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// The base template is empty, so there is nothing to attach facts to.
    #[error("base template is empty")]
    EmptyTemplate,
}

/// Errors raised while serializing or persisting a document.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by [`crate::pipeline::generate_model`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The base template could not be loaded or was empty.
    #[error("could not load base model from {}", path.display())]
    MissingTemplate { path: PathBuf },

    #[error(transparent)]
    Assemble(#[from] AssembleError),
}
