use std::path::PathBuf;

use clap::{Args, Subcommand};
use lift_config::LiftConfig;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the full migration: assets, linked entries, blog posts.
    Migrate(MigrateArgs),
    /// Point SEO entries at their featured image assets.
    BackfillImages(BackfillImagesArgs),
    /// Convert HTML score notes to Markdown.
    ConvertNotes(ConvertNotesArgs),
    /// Unpublish and delete every entry in the environment.
    Purge(PurgeArgs),
    /// Show checkpoint progress without contacting the CMS.
    Status(StatusArgs),
}

/// Arguments for `postlift migrate`.
#[derive(Clone, Debug, Args)]
pub struct MigrateArgs {
    /// Export file to read (overrides migration.input)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Directory holding checkpoint files (overrides migration.checkpoint_dir)
    #[arg(long)]
    pub checkpoint_dir: Option<PathBuf>,

    /// Upload images no existing asset matches
    #[arg(long)]
    pub upload_missing_assets: bool,
}

impl MigrateArgs {
    pub fn apply(&self, config: &mut LiftConfig) {
        if let Some(input) = &self.input {
            config.migration.input.clone_from(input);
        }
        if let Some(dir) = &self.checkpoint_dir {
            config.migration.checkpoint_dir.clone_from(dir);
        }
        if self.upload_missing_assets {
            config.migration.upload_missing_assets = true;
        }
    }
}

/// Arguments for `postlift backfill-images`.
#[derive(Clone, Debug, Args)]
pub struct BackfillImagesArgs {
    /// Export file to read (overrides migration.input)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Directory holding checkpoint files (overrides migration.checkpoint_dir)
    #[arg(long)]
    pub checkpoint_dir: Option<PathBuf>,
}

impl BackfillImagesArgs {
    pub fn apply(&self, config: &mut LiftConfig) {
        if let Some(input) = &self.input {
            config.migration.input.clone_from(input);
        }
        if let Some(dir) = &self.checkpoint_dir {
            config.migration.checkpoint_dir.clone_from(dir);
        }
    }
}

/// Arguments for `postlift convert-notes`.
#[derive(Clone, Debug, Args)]
pub struct ConvertNotesArgs {
    /// Processed-ids log (overrides migration.processed_log)
    #[arg(long)]
    pub log: Option<PathBuf>,
}

/// Arguments for `postlift purge`.
#[derive(Clone, Debug, Args)]
pub struct PurgeArgs {
    /// Confirm deleting every entry
    #[arg(long)]
    pub yes: bool,
}

/// Arguments for `postlift status`.
#[derive(Clone, Debug, Args)]
pub struct StatusArgs {
    /// Directory holding checkpoint files (overrides migration.checkpoint_dir)
    #[arg(long)]
    pub checkpoint_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn migrate_args_override_config() {
        let mut config = LiftConfig::default();
        let args = MigrateArgs {
            input: Some(PathBuf::from("other.json")),
            checkpoint_dir: None,
            upload_missing_assets: true,
        };
        args.apply(&mut config);

        assert_eq!(config.migration.input, PathBuf::from("other.json"));
        assert_eq!(config.migration.checkpoint_dir, PathBuf::from("."));
        assert!(config.migration.upload_missing_assets);
    }

    #[test]
    fn absent_flags_leave_config_alone() {
        let mut config = LiftConfig::default();
        let args = MigrateArgs {
            input: None,
            checkpoint_dir: None,
            upload_missing_assets: false,
        };
        args.apply(&mut config);
        assert_eq!(
            config.migration.input,
            PathBuf::from("data/exported_posts.json")
        );
        assert!(!config.migration.upload_missing_assets);
    }
}
