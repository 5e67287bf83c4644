//! Conversion of HTML score notes to Markdown on already-published entries.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use lift_cms::{Entry, EntryQuery};
use serde_json::Value;

use crate::error::MigrateError;
use crate::linked::SCORES_TYPE;
use crate::report::PhaseReport;
use crate::retry::with_backoff;
use crate::session::{Session, pause};
use crate::update::update_and_publish;

/// Notes fields on a `scores` entry that may hold HTML.
pub const NOTE_FIELDS: [&str; 4] = [
    "strength_notes",
    "taste_notes",
    "quality_notes",
    "overall_notes",
];

/// Line width handed to the converter; wide enough to avoid re-wrapping prose.
const MARKDOWN_WIDTH: usize = 10_000;

const LIST_PAGE_SIZE: u32 = 100;

/// Plain-text log of entry ids already converted, one per line.
#[derive(Debug)]
pub struct ProcessedLog {
    path: PathBuf,
    ids: HashSet<String>,
}

impl ProcessedLog {
    /// Read the log. A missing file is an empty log.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::CheckpointIo`] when an existing log cannot be
    /// read.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, MigrateError> {
        let path = path.into();
        let ids = match std::fs::read_to_string(&path) {
            Ok(raw) => raw
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(source) => return Err(MigrateError::CheckpointIo { path, source }),
        };
        Ok(Self { path, ids })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Append `id` to the file and remember it.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::CheckpointIo`] when the file cannot be written.
    pub fn append(&mut self, id: &str) -> Result<(), MigrateError> {
        let io_err = |source| MigrateError::CheckpointIo {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        writeln!(file, "{id}").map_err(io_err)?;
        self.ids.insert(id.to_string());
        Ok(())
    }
}

/// Convert an HTML fragment to Markdown.
///
/// # Errors
///
/// Returns [`MigrateError::Conversion`] when the HTML cannot be parsed.
pub fn html_to_markdown(html: &str) -> Result<String, MigrateError> {
    let markdown = html2text::from_read(html.as_bytes(), MARKDOWN_WIDTH)
        .map_err(|e| MigrateError::Conversion(e.to_string()))?;
    Ok(markdown.trim_end().to_string())
}

/// Non-empty HTML notes on `entry`, by field name.
#[must_use]
pub fn html_notes<'a>(entry: &'a Entry, locale: &str) -> Vec<(&'static str, &'a str)> {
    NOTE_FIELDS
        .iter()
        .filter_map(|field| {
            entry
                .field(field, locale)
                .and_then(Value::as_str)
                .filter(|html| !html.trim().is_empty())
                .map(|html| (*field, html))
        })
        .collect()
}

/// Every `scores` entry, following pagination.
async fn list_scores(session: &Session) -> Result<Vec<Entry>, MigrateError> {
    let store = session.store();
    let mut query = EntryQuery {
        content_type: Some(SCORES_TYPE.to_string()),
        limit: LIST_PAGE_SIZE,
        skip: 0,
    };
    let mut entries = Vec::new();
    loop {
        let page = with_backoff(&session.lookup, "list scores", || store.list_entries(&query)).await?;
        let fetched = page.items.len();
        entries.extend(page.items);
        let seen = u64::try_from(entries.len()).unwrap_or(u64::MAX);
        if fetched < LIST_PAGE_SIZE as usize || seen >= page.total {
            return Ok(entries);
        }
        query.skip += LIST_PAGE_SIZE;
    }
}

/// Convert HTML notes on every unprocessed `scores` entry to Markdown.
///
/// Converted entries are updated, published, and appended to `log`. A
/// failure on one entry is logged and the next entry is attempted.
///
/// # Errors
///
/// Returns an error only when listing the entries fails.
pub async fn convert_notes(
    session: &Session,
    log: &mut ProcessedLog,
) -> Result<PhaseReport, MigrateError> {
    let locale = session.locale();
    let entries = list_scores(session).await?;
    tracing::info!(entries = entries.len(), "fetched scores entries");

    let mut report = PhaseReport::default();
    for entry in &entries {
        let entry_id = entry.id();
        let notes = html_notes(entry, locale);
        if notes.is_empty() {
            continue;
        }
        if log.contains(entry_id) {
            tracing::debug!(entry_id, "already converted, skipping");
            report.skipped += 1;
            continue;
        }

        let converted: Result<Vec<(&str, String)>, MigrateError> = notes
            .into_iter()
            .map(|(field, html)| Ok((field, html_to_markdown(html)?)))
            .collect();
        let converted = match converted {
            Ok(converted) => converted,
            Err(error) => {
                tracing::error!(entry_id, %error, "failed to convert notes");
                report.failed += 1;
                continue;
            }
        };

        let result = update_and_publish(session, entry_id, |fresh| {
            for (field, markdown) in &converted {
                fresh.set_field(field, locale, Value::String(markdown.clone()));
            }
        })
        .await;

        match result {
            Ok(_) => {
                tracing::info!(entry_id, fields = converted.len(), "converted notes to markdown");
                if let Err(error) = log.append(entry_id) {
                    tracing::error!(entry_id, %error, "failed to record processed entry");
                }
                report.completed += 1;
            }
            Err(error) => {
                tracing::error!(entry_id, %error, "failed to update entry");
                report.failed += 1;
            }
        }

        pause(session.throttle.update()).await;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fault, MemoryStore, Op, session};
    use lift_config::ThrottleConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn log_round_trips_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("html-to-markdown.log");

        let mut log = ProcessedLog::load(&path).unwrap();
        assert!(log.is_empty());
        log.append("e1").unwrap();
        log.append("e2").unwrap();

        let reloaded = ProcessedLog::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("e1"));
        assert!(!reloaded.contains("e3"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "e1\ne2\n");
    }

    #[test]
    fn converts_html_fragments() {
        let markdown = html_to_markdown("<p>Very <strong>heavy</strong> body high.</p>").unwrap();
        assert!(!markdown.contains('<'));
        assert!(markdown.contains("heavy"));
        assert!(markdown.starts_with("Very"));
        assert!(!markdown.ends_with('\n'));
    }

    #[test]
    fn picks_non_empty_html_notes() {
        let entry: Entry = serde_json::from_value(json!({
            "sys": { "id": "s1", "version": 2 },
            "fields": {
                "strength_notes": { "en-US": "<p>Strong</p>" },
                "taste_notes": { "en-US": "" },
                "quality_notes": { "de-DE": "<p>Gut</p>" },
                "overall_notes": { "en-US": "<em>Great</em>" }
            }
        }))
        .unwrap();

        let notes = html_notes(&entry, "en-US");
        assert_eq!(
            notes,
            vec![("strength_notes", "<p>Strong</p>"), ("overall_notes", "<em>Great</em>")]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn converts_unprocessed_entries_and_logs_them() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::shared();
        let fresh = store.seed_entry(
            "scores",
            json!({ "title": { "en-US": "Scores" }, "taste_notes": { "en-US": "<p>Sweet <em>citrus</em></p>" } }),
            true,
        );
        let done = store.seed_entry(
            "scores",
            json!({ "strength_notes": { "en-US": "<p>Already</p>" } }),
            true,
        );
        store.seed_entry("scores", json!({ "title": { "en-US": "No notes" } }), true);
        store.seed_entry("seo", json!({ "strength_notes": { "en-US": "<p>Wrong type</p>" } }), true);
        store.script(Op::Update, [Fault::VersionConflict]);
        let session = session(&store, dir.path()).with_throttle(ThrottleConfig {
            update_ms: 1_000,
            ..ThrottleConfig::none()
        });

        let log_path = dir.path().join("html-to-markdown.log");
        std::fs::write(&log_path, format!("{done}\n")).unwrap();
        let mut log = ProcessedLog::load(&log_path).unwrap();

        let started = tokio::time::Instant::now();
        let report = convert_notes(&session, &mut log).await.unwrap();
        // Only the converted entry is followed by the update delay.
        assert_eq!(started.elapsed(), std::time::Duration::from_millis(1_000));

        assert_eq!(report.completed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 0);
        assert!(log.contains(&fresh));

        let entry = store.entry(&fresh).unwrap();
        let notes = entry.field("taste_notes", "en-US").and_then(Value::as_str).unwrap();
        assert!(!notes.contains('<'));
        assert!(notes.contains("citrus"));
        assert_eq!(entry.field("title", "en-US"), Some(&json!("Scores")));

        let untouched = store.entry(&done).unwrap();
        assert_eq!(untouched.field("strength_notes", "en-US"), Some(&json!("<p>Already</p>")));
    }
}
