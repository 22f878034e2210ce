use std::path::Path;

use anyhow::Context;
use forge_core::extract_names;
use forge_snowflake::SnowflakeClient;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{QueryArgs, SqlSource};
use crate::context::AppContext;
use crate::pipeline::{Generation, GenerationReport, emit, generate_if_any_match, stage_model};

/// Handle `semforge query`.
///
/// Runs the data dictionary query, turns the name column into fact names and
/// builds a model from them. An empty result, no usable names, or no catalog
/// matches produce the empty model `{}` rather than an error.
pub async fn handle(args: &QueryArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let sql = read_sql(&args.source)?;
    let report = if sql.trim().is_empty() {
        tracing::warn!("query is empty");
        GenerationReport::empty(Vec::new())
    } else {
        run(&sql, args, ctx).await?
    };
    emit(&report, args.yaml, flags)
}

async fn run(sql: &str, args: &QueryArgs, ctx: &AppContext) -> anyhow::Result<GenerationReport> {
    let client = SnowflakeClient::new(&ctx.config.snowflake)?;
    tracing::info!("executing data dictionary query");
    let result = client
        .execute(sql)
        .await
        .context("data dictionary query failed")?;
    tracing::info!(rows = result.len(), "query executed");

    if result.is_empty() {
        tracing::warn!("no results returned from data dictionary query");
        return Ok(GenerationReport::empty(Vec::new()));
    }

    let names = extract_names(&result, ctx.name_column(args.column.as_deref()));
    if names.is_empty() {
        tracing::warn!("no valid fact names could be extracted from results");
        return Ok(GenerationReport::empty(Vec::new()));
    }

    let paths = ctx.model_paths(&args.model);
    let generated = match generate_if_any_match(&names, &paths)? {
        Generation::Built(generated) => generated,
        Generation::NoMatch(missing) => return Ok(GenerationReport::empty(missing)),
    };

    let mut report = GenerationReport::new(generated);
    report.staged = stage_model(ctx, &report.model, &args.stage, report.output.as_deref()).await?;
    Ok(report)
}

fn read_sql(source: &SqlSource) -> anyhow::Result<String> {
    match (&source.sql, &source.sql_file) {
        (Some(sql), _) => Ok(sql.clone()),
        (None, Some(path)) => read_sql_file(path),
        (None, None) => anyhow::bail!("either --sql or --sql-file is required"),
    }
}

fn read_sql_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read SQL file {}", path.display()))
}
