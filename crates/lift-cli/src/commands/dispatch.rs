use lift_config::LiftConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: LiftConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Migrate(args) => commands::migrate::handle(&args, config, flags).await,
        Commands::BackfillImages(args) => {
            commands::backfill_images::handle(&args, config, flags).await
        }
        Commands::ConvertNotes(args) => commands::convert_notes::handle(&args, config, flags).await,
        Commands::Purge(args) => commands::purge::handle(&args, &config, flags).await,
        Commands::Status(args) => commands::status::handle(&args, config, flags),
    }
}
