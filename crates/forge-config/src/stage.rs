//! Staging destination and storage backend configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default base name for staged files.
fn default_filename_base() -> String {
    String::from("semantic_model")
}

fn default_local_root() -> PathBuf {
    PathBuf::from(".semforge/stages")
}

/// Where staged files physically land.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageBackend {
    /// A directory on the local filesystem (`local_root`).
    #[default]
    Local,
    /// An S3-compatible bucket backing an external stage.
    S3,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StageConfig {
    /// Stage to upload generated models to (e.g., `@my_stage/semantic_models/`).
    /// Staging is skipped when empty.
    #[serde(default)]
    pub destination: String,

    /// Base name fed to the unique-name generator.
    #[serde(default = "default_filename_base")]
    pub filename_base: String,

    #[serde(default)]
    pub backend: StageBackend,

    /// Root directory for the local backend.
    #[serde(default = "default_local_root")]
    pub local_root: PathBuf,

    #[serde(default)]
    pub bucket: String,

    #[serde(default)]
    pub region: String,

    /// Custom S3 endpoint (MinIO, R2, ...). Empty means AWS.
    #[serde(default)]
    pub endpoint: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            destination: String::new(),
            filename_base: default_filename_base(),
            backend: StageBackend::default(),
            local_root: default_local_root(),
            bucket: String::new(),
            region: String::new(),
            endpoint: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
        }
    }
}

impl StageConfig {
    /// Whether generated models should be staged at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.destination.trim().is_empty()
    }

    /// Check if the S3 backend has the minimum required fields.
    #[must_use]
    pub fn s3_is_configured(&self) -> bool {
        !self.bucket.is_empty()
            && !self.access_key_id.is_empty()
            && !self.secret_access_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_disabled_local() {
        let config = StageConfig::default();
        assert!(!config.is_enabled());
        assert_eq!(config.backend, StageBackend::Local);
        assert_eq!(config.filename_base, "semantic_model");
        assert!(!config.s3_is_configured());
    }

    #[test]
    fn blank_destination_is_disabled() {
        let config = StageConfig {
            destination: "   ".into(),
            ..Default::default()
        };
        assert!(!config.is_enabled());
    }

    #[test]
    fn s3_requires_bucket_and_keys() {
        let config = StageConfig {
            backend: StageBackend::S3,
            bucket: "models".into(),
            access_key_id: "key".into(),
            secret_access_key: String::new(),
            ..Default::default()
        };
        assert!(!config.s3_is_configured());

        let config = StageConfig {
            secret_access_key: "secret".into(),
            ..config
        };
        assert!(config.s3_is_configured());
    }
}
