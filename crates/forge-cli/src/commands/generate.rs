use anyhow::Context;
use forge_core::generate_model;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GenerateArgs;
use crate::context::AppContext;
use crate::pipeline::{GenerationReport, Placement, emit, stage_model};

/// Handle `semforge generate`.
pub async fn handle(args: &GenerateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let paths = ctx.model_paths(&args.model);
    let generated = generate_model(&args.facts, &paths).with_context(|| {
        format!(
            "failed to generate model from {}",
            paths.base_template.display()
        )
    })?;
    tracing::info!(
        requested = args.facts.len(),
        attached = generated.fact_count(),
        missing = generated.resolution.missing.len(),
        "model generated"
    );

    let mut report = GenerationReport::new(generated);
    if report.placement != Placement::Unchanged {
        report.staged =
            stage_model(ctx, &report.model, &args.stage, report.output.as_deref()).await?;
    }
    emit(&report, args.yaml, flags)
}
