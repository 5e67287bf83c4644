//! Reading the static export.

use std::path::Path;

use lift_core::entities::{Export, Post};
use serde::Deserialize;
use serde_json::Value;

use crate::error::MigrateError;

/// The export envelope, with records left unparsed.
#[derive(Deserialize)]
struct RawExport {
    #[serde(default)]
    entries: Vec<Value>,
}

/// Read and parse the export file.
///
/// A record that does not parse as a post (no `id`, wrong field types) is
/// logged and left out; the remaining records still load.
///
/// # Errors
///
/// Returns [`MigrateError::InputIo`] or [`MigrateError::InputFormat`] when
/// the file is unreadable or is not an export object. Both are fatal to a run.
pub fn load_export(path: &Path) -> Result<Export, MigrateError> {
    let raw = std::fs::read_to_string(path).map_err(|source| MigrateError::InputIo {
        path: path.to_path_buf(),
        source,
    })?;
    let envelope: RawExport =
        serde_json::from_str(&raw).map_err(|source| MigrateError::InputFormat {
            path: path.to_path_buf(),
            source,
        })?;

    let total = envelope.entries.len();
    let entries: Vec<Post> = envelope
        .entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(post) => Some(post),
            Err(error) => {
                tracing::warn!(index, %error, "skipping malformed export record");
                None
            }
        })
        .collect();

    tracing::info!(
        path = %path.display(),
        posts = entries.len(),
        skipped = total - entries.len(),
        "loaded export"
    );
    Ok(Export { entries })
}
