//! Migration error types.

use std::path::PathBuf;

use lift_cms::CmsError;
use lift_core::CoreError;
use thiserror::Error;

/// Errors from migration phases and maintenance commands.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// A remote call failed (after any retries).
    #[error(transparent)]
    Cms(#[from] CmsError),

    /// A source record could not be interpreted.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A checkpoint file could not be read, created, or written.
    #[error("checkpoint {}: {source}", path.display())]
    CheckpointIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A checkpoint file holds something other than the expected JSON map.
    #[error("checkpoint {} is malformed: {source}", path.display())]
    CheckpointFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The export file could not be read.
    #[error("input {}: {source}", path.display())]
    InputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export file is not a valid export document.
    #[error("input {} is malformed: {source}", path.display())]
    InputFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A post has no checkpointed sub-entries to link against.
    #[error("post {post_id} has no linked entries")]
    MissingLinkedEntries { post_id: String },

    /// HTML could not be converted to Markdown.
    #[error("HTML conversion failed: {0}")]
    Conversion(String),

    /// A destructive command was invoked without confirmation.
    #[error("refusing to {action} without confirmation")]
    NotConfirmed { action: String },
}
