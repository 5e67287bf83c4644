use lift_config::LiftConfig;
use lift_migrate::purge::purge_entries;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PurgeArgs;
use crate::context;
use crate::output::output;

#[derive(Debug, Serialize)]
struct PurgeSummary {
    deleted: usize,
}

/// Handle `postlift purge`.
pub async fn handle(args: &PurgeArgs, config: &LiftConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !args.yes {
        anyhow::bail!(
            "purge deletes every entry in the '{}' environment; re-run with --yes to confirm",
            config.cms.environment
        );
    }
    let session = context::connect(config)?;
    let deleted = purge_entries(&session, args.yes).await?;
    output(&PurgeSummary { deleted }, flags.format)
}
