//! Moving a local file into a stage.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use forge_config::{StageBackend, StageConfig};
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};

use crate::destination::StageDestination;
use crate::error::StageError;
use crate::receipt::{SKIPPED, TransferReceipt, TransferRow, UPLOADED};

/// Anything that can place a local file into a stage under a given name.
#[async_trait]
pub trait StageTransport: Send + Sync {
    /// Upload `local` to `destination` as `name` and return the transfer
    /// result row.
    ///
    /// An `Ok` row may still carry a non-`UPLOADED` status.
    async fn put(
        &self,
        local: &Path,
        destination: &StageDestination,
        name: &str,
    ) -> Result<TransferRow, StageError>;
}

/// A stage backed by an [`ObjectStore`]: a local directory, an S3-compatible
/// bucket behind an external stage, or memory.
///
/// Existing objects are never overwritten; a second put of the same key
/// reports `SKIPPED`.
#[derive(Debug, Clone)]
pub struct ObjectStoreStage {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreStage {
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Stage files under `root` on the local filesystem, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::Io`] if `root` cannot be created, or
    /// [`StageError::Store`] if it cannot be opened.
    pub fn local(root: &Path) -> Result<Self, StageError> {
        std::fs::create_dir_all(root).map_err(|source| StageError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let store = LocalFileSystem::new_with_prefix(root)?;
        Ok(Self::new(Arc::new(store)))
    }

    /// Stage files in the bucket named by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::NotConfigured`] if the bucket or credentials are
    /// missing, or [`StageError::Store`] if the client cannot be built.
    pub fn s3(config: &StageConfig) -> Result<Self, StageError> {
        if !config.s3_is_configured() {
            let missing = [
                ("bucket", &config.bucket),
                ("access_key_id", &config.access_key_id),
                ("secret_access_key", &config.secret_access_key),
            ]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| format!("stage.{name}"))
            .collect();
            return Err(StageError::NotConfigured { missing });
        }

        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key);
        if !config.region.is_empty() {
            builder = builder.with_region(&config.region);
        }
        if !config.endpoint.is_empty() {
            builder = builder
                .with_endpoint(&config.endpoint)
                .with_allow_http(config.endpoint.starts_with("http://"));
        }
        Ok(Self::new(Arc::new(builder.build()?)))
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()))
    }

    /// Build the transport selected by `config.backend`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::local`] and [`Self::s3`].
    pub fn from_config(config: &StageConfig) -> Result<Self, StageError> {
        match config.backend {
            StageBackend::Local => Self::local(&config.local_root),
            StageBackend::S3 => Self::s3(config),
        }
    }

    /// The underlying store, for reading staged files back.
    #[must_use]
    pub fn store(&self) -> Arc<dyn ObjectStore> {
        Arc::clone(&self.store)
    }
}

#[async_trait]
impl StageTransport for ObjectStoreStage {
    async fn put(
        &self,
        local: &Path,
        destination: &StageDestination,
        name: &str,
    ) -> Result<TransferRow, StageError> {
        let bytes = tokio::fs::read(local).await.map_err(|source| StageError::Io {
            path: local.to_path_buf(),
            source,
        })?;
        let source_size = bytes.len() as u64;
        let key = ObjectPath::from(destination.object_key(name));
        let row = |target_size: u64, status: &str, message: String| TransferReceipt {
            source: local.display().to_string(),
            target: name.to_string(),
            source_size,
            target_size,
            source_compression: String::from("NONE"),
            target_compression: String::from("NONE"),
            status: status.to_string(),
            message,
        }
        .into_row();

        match self.store.head(&key).await {
            Ok(existing) => {
                tracing::debug!(key = %key, "object already staged");
                return Ok(row(
                    u64::try_from(existing.size).unwrap_or(u64::MAX),
                    SKIPPED,
                    String::from("file already exists"),
                ));
            }
            Err(object_store::Error::NotFound { .. }) => {}
            Err(e) => return Err(e.into()),
        }

        self.store.put(&key, PutPayload::from(bytes)).await?;
        tracing::debug!(key = %key, bytes = source_size, "object written");
        Ok(row(source_size, UPLOADED, String::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s3_config() -> StageConfig {
        StageConfig {
            backend: StageBackend::S3,
            bucket: "models".into(),
            access_key_id: "key".into(),
            secret_access_key: "secret".into(),
            region: "us-east-1".into(),
            ..Default::default()
        }
    }

    #[test]
    fn s3_lists_missing_settings() {
        let config = StageConfig {
            backend: StageBackend::S3,
            bucket: "models".into(),
            ..Default::default()
        };
        let err = ObjectStoreStage::s3(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "stage backend not configured: missing stage.access_key_id, stage.secret_access_key"
        );
    }

    #[test]
    fn s3_builds_with_credentials() {
        assert!(ObjectStoreStage::s3(&s3_config()).is_ok());
        let custom = StageConfig {
            endpoint: "http://localhost:9000".into(),
            ..s3_config()
        };
        assert!(ObjectStoreStage::from_config(&custom).is_ok());
    }

    #[test]
    fn local_creates_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("stages/nested");
        ObjectStoreStage::local(&root).unwrap();
        assert!(root.is_dir());
    }

    #[tokio::test]
    async fn missing_local_file_is_io_error() {
        let stage = ObjectStoreStage::in_memory();
        let dest = StageDestination::parse("@s").unwrap();
        let err = stage
            .put(Path::new("/no/such/model.yaml"), &dest, "m.yaml")
            .await
            .unwrap_err();
        assert!(matches!(err, StageError::Io { .. }));
    }
}
