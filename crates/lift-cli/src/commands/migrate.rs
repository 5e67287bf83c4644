use anyhow::Context;
use lift_config::LiftConfig;
use lift_core::enums::MigrationPhase;
use lift_migrate::Migrator;
use lift_migrate::source::load_export;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MigrateArgs;
use crate::context;
use crate::output::output;
use crate::progress::Progress;

/// Handle `postlift migrate`.
///
/// Per-record failures are reported in the output but do not fail the
/// command; only setup problems do.
pub async fn handle(
    args: &MigrateArgs,
    mut config: LiftConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    args.apply(&mut config);
    let session = context::connect(&config)?;
    let export = load_export(&config.migration.input).context("failed to load export")?;

    let progress = Progress::spinner(next_step(MigrationPhase::Pending));
    let result = Migrator::new(&session)
        .run_with(&export.entries, |phase, report| {
            tracing::debug!(%phase, ?report, "phase complete");
            progress.set_message(next_step(phase));
        })
        .await;

    match result {
        Ok(report) => {
            progress.finish_ok(&format!(
                "{} published, {} failures",
                report.posts.completed,
                report.failures()
            ));
            output(&report, flags.format)
        }
        Err(error) => {
            progress.finish_err("migration aborted");
            Err(error).context("migration aborted")
        }
    }
}

/// Spinner text for the work that follows `phase`.
const fn next_step(phase: MigrationPhase) -> &'static str {
    match phase {
        MigrationPhase::Pending => "resolving assets",
        MigrationPhase::AssetsResolved => "creating linked entries",
        MigrationPhase::LinkedEntriesCreated => "assembling posts",
        MigrationPhase::PostsAssembled => "publishing posts",
        MigrationPhase::PostsPublished => "done",
    }
}
