use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Facts { action } => commands::facts::handle(&action, ctx, flags),
        Commands::Generate(args) => commands::generate::handle(&args, ctx, flags).await,
        Commands::Query(args) => commands::query::handle(&args, ctx, flags).await,
        Commands::Inspect(args) => commands::inspect::handle(&args, flags),
        Commands::Ask(args) => commands::ask::handle(&args, ctx, flags).await,
        Commands::Name(args) => commands::name::handle(&args, flags),
    }
}
