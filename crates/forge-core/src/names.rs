//! Extraction of requested fact names from a tabular query result.

use serde::{Deserialize, Serialize};

/// Column that carries fact names in a data dictionary query.
pub const DEFAULT_NAME_COLUMN: &str = "ELEMENT_NUMBER";

/// A tabular result: named columns and rows of nullable text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl ResultSet {
    #[must_use]
    pub const fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    /// Position of the column named exactly `name`.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column)?.as_deref()
    }
}

/// Collect one trimmed, non-empty name per row of `column`, in row order.
///
/// Rows whose value is null, empty or whitespace are skipped with a warning.
/// If the column does not exist at all, every row is skipped.
#[must_use]
pub fn extract_names(result: &ResultSet, column: &str) -> Vec<String> {
    let index = result.column_index(column);
    if index.is_none() {
        tracing::warn!(column, columns = ?result.columns, "name column not present in result");
    }

    let mut names = Vec::new();
    for row in 0..result.len() {
        let value = index
            .and_then(|col| result.cell(row, col))
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match value {
            Some(name) => {
                tracing::debug!(row, fact = name, "found fact name");
                names.push(name.to_string());
            }
            None => tracing::warn!(row, column, "skipping row with missing value"),
        }
    }

    tracing::info!(count = names.len(), "fact names extracted");
    names
}
