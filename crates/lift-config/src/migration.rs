//! Migration inputs and local state locations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_input() -> PathBuf {
    PathBuf::from("data/exported_posts.json")
}

fn default_checkpoint_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_processed_log() -> PathBuf {
    PathBuf::from("html-to-markdown.log")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MigrationConfig {
    /// Static export file holding the source posts.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Directory holding the per-phase checkpoint files.
    #[serde(default = "default_checkpoint_dir")]
    pub checkpoint_dir: PathBuf,

    /// Plain-text log of entry ids already handled by notes conversion.
    #[serde(default = "default_processed_log")]
    pub processed_log: PathBuf,

    /// Create assets that have no remote match instead of skipping them.
    #[serde(default)]
    pub upload_missing_assets: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            checkpoint_dir: default_checkpoint_dir(),
            processed_log: default_processed_log(),
            upload_missing_assets: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = MigrationConfig::default();
        assert_eq!(config.input, PathBuf::from("data/exported_posts.json"));
        assert_eq!(config.checkpoint_dir, PathBuf::from("."));
        assert!(!config.upload_missing_assets);
    }
}
