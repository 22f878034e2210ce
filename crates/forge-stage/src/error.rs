//! Stage transfer error types.

use std::path::PathBuf;

use forge_core::SerializeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("invalid stage destination '{raw}': {reason}")]
    InvalidDestination { raw: String, reason: String },

    #[error("stage backend not configured: missing {}", missing.join(", "))]
    NotConfigured { missing: Vec<String> },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error("object store error: {0}")]
    Store(#[from] object_store::Error),

    #[error("malformed transfer result row: {0}")]
    MalformedReceipt(String),

    /// The transfer completed but the destination did not accept the file.
    #[error("upload not accepted, status {status}")]
    Rejected { status: String },
}
