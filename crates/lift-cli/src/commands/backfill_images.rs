use anyhow::Context;
use lift_config::LiftConfig;
use lift_migrate::featured::backfill_featured_images;
use lift_migrate::source::load_export;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BackfillImagesArgs;
use crate::context;
use crate::output::output;
use crate::progress::Progress;

/// Handle `postlift backfill-images`.
pub async fn handle(
    args: &BackfillImagesArgs,
    mut config: LiftConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    args.apply(&mut config);
    let session = context::connect(&config)?;
    let export = load_export(&config.migration.input).context("failed to load export")?;

    let progress = Progress::spinner("updating SEO featured images");
    let report = backfill_featured_images(&session, &export.entries)
        .await
        .inspect_err(|_| progress.finish_err("backfill aborted"))
        .context("featured image backfill needs existing asset and linked entry checkpoints")?;
    progress.finish_ok(&format!("{} SEO entries updated", report.completed));

    output(&report, flags.format)
}
