//! Generation and staging steps shared by `generate` and `query`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use forge_core::{
    Document, FactRecord, FactsPlacement, GeneratedModel, ModelPaths, build_model, empty_document,
    load_facts, load_template, resolve, to_text,
};
use forge_stage::{StageDestination, save_and_stage};
use serde::Serialize;

use crate::cli::root_commands::StageArgs;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Where a model was staged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedModel {
    pub name: String,
    /// Stage path usable as a Cortex Analyst `semantic_model_file`.
    pub path: String,
}

/// What happened to the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Facts replaced `tables[0].facts`.
    Attached,
    /// The template has no first table; returned as-is.
    NoTable,
    /// Nothing resolved; the template was returned as-is and not saved.
    Unchanged,
    /// The query gave nothing to build from; the model is `{}`.
    Empty,
}

/// Outcome of one generation, as printed by `generate` and `query`.
#[derive(Debug, Serialize)]
pub struct GenerationReport {
    pub model: Document,
    pub resolved: Vec<String>,
    pub missing: Vec<String>,
    pub placement: Placement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staged: Option<StagedModel>,
}

impl GenerationReport {
    pub fn new(generated: GeneratedModel) -> Self {
        let placement = match generated.placement {
            Some(FactsPlacement::Attached { .. }) => Placement::Attached,
            Some(FactsPlacement::NoTable) => Placement::NoTable,
            None => Placement::Unchanged,
        };
        Self {
            resolved: generated
                .resolution
                .facts
                .iter()
                .map(|fact| fact.name().to_string())
                .collect(),
            missing: generated.resolution.missing,
            model: generated.model,
            placement,
            output: generated.saved_to,
            staged: None,
        }
    }

    /// The `{}` result for a query that produced nothing to build from.
    pub fn empty(missing: Vec<String>) -> Self {
        Self {
            model: empty_document(),
            resolved: Vec::new(),
            missing,
            placement: Placement::Empty,
            output: None,
            staged: None,
        }
    }
}

/// What the query workflow built.
#[derive(Debug)]
pub enum Generation {
    Built(GeneratedModel),
    /// None of the requested names is in the catalog; carries them all.
    NoMatch(Vec<String>),
}

/// Generate a model only if at least one requested name is in the catalog.
///
/// The catalog is read and resolved once. The template is not read when
/// nothing matches.
pub fn generate_if_any_match(names: &[String], paths: &ModelPaths) -> anyhow::Result<Generation> {
    let resolution = resolve(names, &load_facts(&paths.fact_catalog));
    if resolution.is_empty() {
        tracing::warn!(
            catalog = %paths.fact_catalog.display(),
            requested = names.len(),
            "no matching facts found in catalog"
        );
        return Ok(Generation::NoMatch(resolution.missing));
    }
    let resolved: Vec<&str> = resolution.facts.iter().map(FactRecord::name).collect();
    tracing::debug!(?resolved, "facts resolved");

    load_template(&paths.base_template)
        .and_then(|template| build_model(template, resolution, paths.output.as_deref()))
        .map(Generation::Built)
        .with_context(|| format!("failed to generate model from {}", paths.base_template.display()))
}

/// Stage `model` if a destination is configured or given.
///
/// Failures are logged and swallowed unless `--require-stage` was passed.
pub async fn stage_model(
    ctx: &AppContext,
    model: &Document,
    args: &StageArgs,
    local_output: Option<&Path>,
) -> anyhow::Result<Option<StagedModel>> {
    let stage_config = &ctx.config.stage;
    let Some(raw) = args
        .stage
        .clone()
        .or_else(|| stage_config.is_enabled().then(|| stage_config.destination.clone()))
    else {
        return Ok(None);
    };
    let base = args
        .stage_prefix
        .as_deref()
        .unwrap_or(&stage_config.filename_base);

    let result = async {
        let transport = ctx.stage_transport()?;
        let name = save_and_stage(&transport, model, &raw, base, local_output, None).await?;
        let path = StageDestination::parse(&raw)?.file_path(&name);
        Ok::<_, forge_stage::StageError>(StagedModel { name, path })
    }
    .await;

    match result {
        Ok(staged) => {
            tracing::info!(stage = %raw, name = %staged.name, "uploaded to stage");
            Ok(Some(staged))
        }
        Err(e) if args.require_stage => {
            Err(anyhow::Error::from(e).context(format!("failed to stage model to {raw}")))
        }
        Err(e) => {
            tracing::warn!(stage = %raw, %e, "failed to upload to stage");
            Ok(None)
        }
    }
}

/// Print a report, or only the model YAML when `yaml_only` is set.
pub fn emit(report: &GenerationReport, yaml_only: bool, flags: &GlobalFlags) -> anyhow::Result<()> {
    if yaml_only {
        print!("{}", to_text(&report.model));
        return Ok(());
    }
    output(report, flags.format)
}
