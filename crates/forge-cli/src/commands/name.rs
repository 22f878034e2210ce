use forge_core::generate_name;

use crate::cli::root_commands::NameArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `semforge name`.
pub fn handle(args: &NameArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let name = generate_name(&args.base, &args.ext);
    match flags.format {
        OutputFormat::Raw => {
            println!("{name}");
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            output(&serde_json::json!({ "name": name }), flags.format)
        }
    }
}
