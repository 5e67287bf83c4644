use anyhow::Context;
use lift_config::LiftConfig;
use lift_migrate::notes::{ProcessedLog, convert_notes};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ConvertNotesArgs;
use crate::context;
use crate::output::output;
use crate::progress::Progress;

/// Handle `postlift convert-notes`.
pub async fn handle(
    args: &ConvertNotesArgs,
    mut config: LiftConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if let Some(log) = &args.log {
        config.migration.processed_log.clone_from(log);
    }
    let session = context::connect(&config)?;
    let mut log = ProcessedLog::load(&config.migration.processed_log)
        .context("failed to read processed-ids log")?;

    let progress = Progress::spinner("converting notes to markdown");
    let report = convert_notes(&session, &mut log)
        .await
        .inspect_err(|_| progress.finish_err("conversion aborted"))
        .context("failed to list scores entries")?;
    progress.finish_ok(&format!("{} entries converted", report.completed));

    output(&report, flags.format)
}
