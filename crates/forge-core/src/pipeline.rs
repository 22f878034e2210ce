//! Local generation pipeline: template + catalog + requested names → model.
//!
//! 1. Load the base template (fatal if it comes back empty)
//! 2. Load the fact catalog once
//! 3. Resolve the requested names in order
//! 4. Assemble the model into a fresh template copy
//! 5. Save it to the configured output path (best-effort)
//!
//! File locations come from [`ModelPaths`]; this crate has no built-in
//! defaults.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml::Value;

use crate::assemble::{FactsPlacement, assemble};
use crate::catalog::load_facts;
use crate::document::{Document, is_empty_document, load_document};
use crate::error::{PipelineError, SerializeError};
use crate::resolve::{Resolution, resolve};
use crate::serialize::{save, to_yaml_string};

/// File locations used by [`generate_model`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    pub base_template: PathBuf,
    pub fact_catalog: PathBuf,
    /// When set, the generated model is also written here.
    pub output: Option<PathBuf>,
}

/// The result of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedModel {
    pub model: Document,
    pub resolution: Resolution,
    /// `None` when nothing resolved and the template copy was returned as-is.
    pub placement: Option<FactsPlacement>,
    /// Where the model was written; `None` if no output was set or the save failed.
    pub saved_to: Option<PathBuf>,
}

impl GeneratedModel {
    /// The model as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`] if the model cannot be serialized.
    pub fn to_yaml(&self) -> Result<String, SerializeError> {
        to_yaml_string(&self.model)
    }

    #[must_use]
    pub fn fact_count(&self) -> usize {
        match self.placement {
            Some(FactsPlacement::Attached { count }) => count,
            _ => 0,
        }
    }
}

/// Generate a semantic model for `names`.
///
/// If none of the requested names resolve, the unmodified template copy is
/// returned and nothing is saved.
///
/// # Errors
///
/// Returns [`PipelineError::MissingTemplate`] if the base template is missing,
/// malformed or empty.
pub fn generate_model<S: AsRef<str>>(
    names: &[S],
    paths: &ModelPaths,
) -> Result<GeneratedModel, PipelineError> {
    let template = load_template(&paths.base_template)?;

    let catalog = load_facts(&paths.fact_catalog);
    tracing::debug!(available = catalog.len(), requested = names.len(), "catalog loaded");

    build_model(template, resolve(names, &catalog), paths.output.as_deref())
}

/// Load the base template, treating a missing, malformed or empty file as fatal.
///
/// # Errors
///
/// Returns [`PipelineError::MissingTemplate`].
pub fn load_template(path: &Path) -> Result<Document, PipelineError> {
    let template = load_document(path);
    if is_empty_document(&template) {
        return Err(PipelineError::MissingTemplate {
            path: path.to_path_buf(),
        });
    }
    Ok(template)
}

/// Assemble an already-resolved set of facts into `template` and save it to
/// `output` when given.
///
/// # Errors
///
/// Returns [`PipelineError`] if `template` is empty.
pub fn build_model(
    template: Document,
    resolution: Resolution,
    output: Option<&Path>,
) -> Result<GeneratedModel, PipelineError> {
    if resolution.is_empty() {
        tracing::warn!("no facts were selected or found");
        return Ok(GeneratedModel {
            model: template,
            resolution,
            placement: None,
            saved_to: None,
        });
    }

    let assembly = assemble(&template, &resolution.facts)?;
    if let FactsPlacement::Attached { count } = assembly.placement {
        tracing::info!(count, "added facts to the semantic model");
    }

    let saved_to = output
        .filter(|path| save(&assembly.model, path))
        .map(Path::to_path_buf);

    Ok(GeneratedModel {
        model: assembly.model,
        resolution,
        placement: Some(assembly.placement),
        saved_to,
    })
}

/// Names of every fact in the catalog at `path`, in catalog order.
#[must_use]
pub fn list_available_facts(path: &Path) -> Vec<String> {
    load_facts(path)
        .names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// A quick structural overview of a semantic model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub name: Option<String>,
    pub description: Option<String>,
    pub table_count: usize,
    pub first_table: Option<String>,
    pub first_table_fact_count: usize,
}

impl ModelSummary {
    #[must_use]
    pub fn of(model: &Document) -> Self {
        let text = |value: Option<&Value>| value.and_then(Value::as_str).map(str::to_string);
        let tables = model
            .get("tables")
            .and_then(Value::as_sequence)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let first = tables.first();

        Self {
            name: text(model.get("name")),
            description: text(model.get("description")),
            table_count: tables.len(),
            first_table: text(first.and_then(|table| table.get("name"))),
            first_table_fact_count: first
                .and_then(|table| table.get("facts"))
                .and_then(Value::as_sequence)
                .map_or(0, Vec::len),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn summary_of_full_model() {
        let model: Document = serde_yaml::from_str(
            "name: mortgage\ndescription: Mortgage applications\ntables:\n  - name: loans\n    facts:\n      - name: A\n      - name: B\n  - name: other\n",
        )
        .unwrap();

        assert_eq!(
            ModelSummary::of(&model),
            ModelSummary {
                name: Some("mortgage".into()),
                description: Some("Mortgage applications".into()),
                table_count: 2,
                first_table: Some("loans".into()),
                first_table_fact_count: 2,
            }
        );
    }

    #[test]
    fn summary_of_sparse_model() {
        let model: Document = serde_yaml::from_str("tables: []").unwrap();
        assert_eq!(ModelSummary::of(&model), ModelSummary::default());
    }

    #[test]
    fn fact_count_follows_placement() {
        let generated = GeneratedModel {
            model: Value::Null,
            resolution: Resolution::default(),
            placement: Some(FactsPlacement::Attached { count: 3 }),
            saved_to: None,
        };
        assert_eq!(generated.fact_count(), 3);
        let generated = GeneratedModel {
            placement: Some(FactsPlacement::NoTable),
            ..generated
        };
        assert_eq!(generated.fact_count(), 0);
    }
}
