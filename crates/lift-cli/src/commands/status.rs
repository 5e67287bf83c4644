use std::path::PathBuf;

use lift_config::LiftConfig;
use lift_migrate::notes::ProcessedLog;
use lift_migrate::{CheckpointStore, CheckpointSummary};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::StatusArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StatusReport {
    checkpoint_dir: PathBuf,
    checkpoints: CheckpointSummary,
    processed_notes: usize,
    cms_configured: bool,
}

/// Handle `postlift status`. Reads local files only.
pub fn handle(args: &StatusArgs, mut config: LiftConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Some(dir) = &args.checkpoint_dir {
        config.migration.checkpoint_dir.clone_from(dir);
    }
    let report = build_report(&config)?;
    output(&report, flags.format)
}

fn build_report(config: &LiftConfig) -> anyhow::Result<StatusReport> {
    let checkpoints = CheckpointStore::new(&config.migration.checkpoint_dir);
    let log = ProcessedLog::load(&config.migration.processed_log)?;
    Ok(StatusReport {
        checkpoint_dir: config.migration.checkpoint_dir.clone(),
        checkpoints: checkpoints.summary(),
        processed_notes: log.len(),
        cms_configured: config.cms.is_configured(),
    })
}
