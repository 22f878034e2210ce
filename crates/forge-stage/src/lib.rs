//! # forge-stage
//!
//! Places generated semantic models into a stage so Cortex Analyst can read
//! them by path.
//!
//! - [`StageDestination`]: `@stage/sub/folder/` parsing and normalization
//! - [`TransferReceipt`]: the eight-column per-file transfer result
//! - [`StageTransport`]: the upload seam, with [`ObjectStoreStage`] as the
//!   shipped implementation
//! - [`upload`] and [`save_and_stage`]: the entry points callers use
//!
//! Staging is best-effort by contract: [`upload`] never fails, it reports
//! `false` and logs the reason.

pub mod destination;
pub mod receipt;
pub mod transport;

mod error;

use std::path::Path;

use forge_core::{Document, NameGenerator, generate_name, write_yaml};

pub use destination::StageDestination;
pub use error::StageError;
pub use receipt::{STATUS_COLUMN, TransferReceipt, TransferRow};
pub use transport::{ObjectStoreStage, StageTransport};

/// Extension of staged model files.
pub const MODEL_EXTENSION: &str = "yaml";

/// Upload `local` to `raw_destination` as `name`.
///
/// Returns true only when the status column of the transfer result reads
/// `UPLOADED`. Every failure (bad destination, unreadable file, store error,
/// malformed result, other status) is logged and reported as false.
pub async fn upload(
    transport: &dyn StageTransport,
    local: &Path,
    raw_destination: &str,
    name: &str,
) -> bool {
    match try_upload(transport, local, raw_destination, name).await {
        Ok(receipt) => {
            tracing::info!(
                destination = raw_destination,
                name,
                bytes = receipt.target_size,
                "uploaded to stage"
            );
            true
        }
        Err(e) => {
            tracing::warn!(
                destination = raw_destination,
                name,
                local = %local.display(),
                %e,
                "stage upload failed"
            );
            false
        }
    }
}

async fn try_upload(
    transport: &dyn StageTransport,
    local: &Path,
    raw_destination: &str,
    name: &str,
) -> Result<TransferReceipt, StageError> {
    let destination = StageDestination::parse(raw_destination)?;
    put_checked(transport, local, &destination, name).await
}

async fn put_checked(
    transport: &dyn StageTransport,
    local: &Path,
    destination: &StageDestination,
    name: &str,
) -> Result<TransferReceipt, StageError> {
    tracing::debug!(local = %local.display(), destination = %destination, name, "uploading");
    let row = transport.put(local, destination, name).await?;
    let receipt = TransferReceipt::from_row(&row)?;
    if receipt.is_uploaded() {
        Ok(receipt)
    } else {
        Err(StageError::Rejected {
            status: receipt.status,
        })
    }
}

/// Write `model` locally and stage it under a fresh timestamped name.
///
/// The file goes to `local_output` when given, otherwise to a temporary
/// directory that is removed before returning. Returns the staged file name.
///
/// Pass a [`NameGenerator`] to keep names distinct across calls made within
/// the same second; without one the plain `{base}_{timestamp}.yaml` form is
/// used.
///
/// # Errors
///
/// Returns [`StageError`] if the destination is invalid, the model cannot be
/// written, the transfer fails, the result row is malformed
/// ([`StageError::MalformedReceipt`]), or the stage reports a status other
/// than `UPLOADED` ([`StageError::Rejected`]).
pub async fn save_and_stage(
    transport: &dyn StageTransport,
    model: &Document,
    raw_destination: &str,
    base: &str,
    local_output: Option<&Path>,
    names: Option<&mut NameGenerator>,
) -> Result<String, StageError> {
    let destination = StageDestination::parse(raw_destination)?;
    let name = match names {
        Some(generator) => generator.issue(base, MODEL_EXTENSION),
        None => generate_name(base, MODEL_EXTENSION),
    };

    let scratch;
    let local = if let Some(path) = local_output {
        path.to_path_buf()
    } else {
        scratch = tempfile::tempdir().map_err(|source| StageError::Io {
            path: std::env::temp_dir(),
            source,
        })?;
        scratch.path().join(&name)
    };

    tracing::info!(path = %local.display(), "saving model for staging");
    write_yaml(model, &local)?;

    let receipt = put_checked(transport, &local, &destination, &name).await?;
    tracing::info!(
        staged = %destination.file_path(&name),
        bytes = receipt.target_size,
        "model staged"
    );
    Ok(name)
}
