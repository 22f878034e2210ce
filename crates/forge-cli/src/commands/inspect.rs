use anyhow::Context;
use forge_core::{ModelSummary, read_document};

use crate::cli::root_commands::InspectArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `semforge inspect`.
pub fn handle(args: &InspectArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let model = read_document(&args.path)
        .with_context(|| format!("failed to read model {}", args.path.display()))?;
    let summary = ModelSummary::of(&model);

    match flags.format {
        OutputFormat::Raw => {
            print!("{}", describe(&summary));
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Yaml => output(&summary, flags.format),
    }
}

fn describe(summary: &ModelSummary) -> String {
    let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| String::from("-"));
    let mut text = format!(
        "name: {}\ndescription: {}\ntables: {}\n",
        or_dash(&summary.name),
        or_dash(&summary.description),
        summary.table_count
    );
    if let Some(table) = &summary.first_table {
        text.push_str(&format!(
            "first table: {table} ({} facts)\n",
            summary.first_table_fact_count
        ));
    }
    text
}
