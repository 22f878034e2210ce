use forge_core::list_available_facts;

use crate::cli::root_commands::FactsCommands;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// Handle `semforge facts`.
pub fn handle(action: &FactsCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        FactsCommands::List(args) => {
            let catalog = ctx.catalog_path(args.catalog.as_deref());
            let names = list_available_facts(&catalog);
            tracing::info!(catalog = %catalog.display(), count = names.len(), "facts listed");
            match flags.format {
                OutputFormat::Raw => {
                    for name in &names {
                        println!("{name}");
                    }
                    Ok(())
                }
                OutputFormat::Json | OutputFormat::Yaml => output(&names, flags.format),
            }
        }
    }
}
