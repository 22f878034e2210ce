use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Fact catalog inspection.
    Facts {
        #[command(subcommand)]
        action: FactsCommands,
    },
    /// Build a semantic model from named facts.
    Generate(GenerateArgs),
    /// Build a semantic model from fact names returned by a Snowflake query.
    Query(QueryArgs),
    /// Summarize a semantic model file.
    Inspect(InspectArgs),
    /// Ask Cortex Analyst a question against a semantic model.
    Ask(AskArgs),
    /// Print a unique timestamped file name.
    Name(NameArgs),
}

#[derive(Clone, Debug, Subcommand)]
pub enum FactsCommands {
    /// List fact names in catalog order.
    List(FactsListArgs),
}

#[derive(Clone, Debug, Args)]
pub struct FactsListArgs {
    /// Fact catalog (defaults to model.fact_catalog).
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Model source and destination overrides shared by `generate` and `query`.
#[derive(Clone, Debug, Default, Args)]
pub struct ModelArgs {
    /// Base semantic model template (defaults to model.base_template).
    #[arg(long)]
    pub template: Option<PathBuf>,
    /// Fact catalog (defaults to model.fact_catalog).
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// Write the generated model here (defaults to model.output).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Staging overrides shared by `generate` and `query`.
#[derive(Clone, Debug, Default, Args)]
pub struct StageArgs {
    /// Stage to upload the model to, e.g. `@my_stage/semantic_models/`.
    #[arg(long)]
    pub stage: Option<String>,
    /// Base name for the staged file; a timestamp is appended.
    #[arg(long)]
    pub stage_prefix: Option<String>,
    /// Fail the command when staging fails instead of warning.
    #[arg(long)]
    pub require_stage: bool,
}

/// Arguments for `semforge generate`.
#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    /// Fact names, in order. Repeat or separate with commas.
    #[arg(long = "fact", required = true, value_delimiter = ',')]
    pub facts: Vec<String>,
    #[command(flatten)]
    pub model: ModelArgs,
    #[command(flatten)]
    pub stage: StageArgs,
    /// Print only the generated model as YAML.
    #[arg(long)]
    pub yaml: bool,
}

#[derive(Clone, Debug, Args)]
#[group(required = true, multiple = false)]
pub struct SqlSource {
    /// SQL text to execute.
    #[arg(long)]
    pub sql: Option<String>,
    /// File holding the SQL to execute.
    #[arg(long)]
    pub sql_file: Option<PathBuf>,
}

/// Arguments for `semforge query`.
#[derive(Clone, Debug, Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub source: SqlSource,
    /// Result column holding fact names (defaults to model.name_column).
    #[arg(long)]
    pub column: Option<String>,
    #[command(flatten)]
    pub model: ModelArgs,
    #[command(flatten)]
    pub stage: StageArgs,
    /// Print only the generated model as YAML.
    #[arg(long)]
    pub yaml: bool,
}

/// Arguments for `semforge inspect`.
#[derive(Clone, Debug, Args)]
pub struct InspectArgs {
    /// Semantic model file.
    pub path: PathBuf,
}

#[derive(Clone, Debug, Args)]
#[group(required = true, multiple = false)]
pub struct AnalystModelSource {
    /// Local semantic model file, sent inline.
    #[arg(long)]
    pub model: Option<PathBuf>,
    /// Staged semantic model, e.g. `@DB.SCHEMA.STAGE/model.yaml`.
    #[arg(long)]
    pub stage_file: Option<String>,
}

/// Arguments for `semforge ask`.
#[derive(Clone, Debug, Args)]
pub struct AskArgs {
    #[command(flatten)]
    pub source: AnalystModelSource,
    /// Natural-language question.
    #[arg(long)]
    pub question: String,
}

/// Arguments for `semforge name`.
#[derive(Clone, Debug, Args)]
pub struct NameArgs {
    #[arg(long, default_value = "semantic_model")]
    pub base: String,
    #[arg(long, default_value = "yaml")]
    pub ext: String,
}
