//! The per-file result row of a stage transfer.

use crate::error::StageError;

/// Index of the status value in a transfer result row.
pub const STATUS_COLUMN: usize = 6;

/// Status reported for a file the stage accepted.
pub const UPLOADED: &str = "UPLOADED";

/// Status reported when an identical file already exists.
pub const SKIPPED: &str = "SKIPPED";

/// A raw transfer result row as a stage reports it, cells possibly null.
pub type TransferRow = Vec<Option<String>>;

/// One row of a PUT-style result:
/// `[source, target, source_size, target_size, source_compression,
/// target_compression, status, message]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub source: String,
    pub target: String,
    pub source_size: u64,
    pub target_size: u64,
    pub source_compression: String,
    pub target_compression: String,
    pub status: String,
    pub message: String,
}

impl TransferReceipt {
    /// True only when the status column reads exactly `UPLOADED`.
    #[must_use]
    pub fn is_uploaded(&self) -> bool {
        self.status == UPLOADED
    }

    /// Decode a result row.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::MalformedReceipt`] if the row has fewer than eight
    /// cells or a size cell is not an integer.
    pub fn from_row(row: &[Option<String>]) -> Result<Self, StageError> {
        if row.len() <= STATUS_COLUMN + 1 {
            return Err(StageError::MalformedReceipt(format!(
                "expected 8 columns, got {}",
                row.len()
            )));
        }
        let text = |index: usize| row[index].clone().unwrap_or_default();
        let size = |index: usize| -> Result<u64, StageError> {
            let raw = text(index);
            raw.trim().parse().map_err(|_| {
                StageError::MalformedReceipt(format!("column {index} is not a size: {raw:?}"))
            })
        };

        Ok(Self {
            source: text(0),
            target: text(1),
            source_size: size(2)?,
            target_size: size(3)?,
            source_compression: text(4),
            target_compression: text(5),
            status: text(STATUS_COLUMN),
            message: text(7),
        })
    }

    /// Encode into the eight-column row layout.
    #[must_use]
    pub fn into_row(self) -> TransferRow {
        [
            self.source,
            self.target,
            self.source_size.to_string(),
            self.target_size.to_string(),
            self.source_compression,
            self.target_compression,
            self.status,
            self.message,
        ]
        .into_iter()
        .map(Some)
        .collect()
    }
}
