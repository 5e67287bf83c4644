//! Per-phase checkpoint files.
//!
//! Each phase owns one flat JSON object mapping a natural key (source URL,
//! post id, slug) to the remote id(s) it produced. A key's presence means the
//! unit is done and must not be redone. The whole map is rewritten after every
//! unit, so a kill at any point loses at most one unit of progress. The cost
//! is O(progress) per write, acceptable at export scale.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::MigrateError;

/// The three checkpointed phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckpointKind {
    /// Source image URL → asset id.
    Assets,
    /// Post id → `{seoId, productInfoId, scoresId}`.
    LinkedEntries,
    /// Slug → blog post entry id.
    BlogPosts,
}

impl CheckpointKind {
    pub const ALL: [Self; 3] = [Self::Assets, Self::LinkedEntries, Self::BlogPosts];

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Assets => "asset_cache.json",
            Self::LinkedEntries => "linked_entries_cache.json",
            Self::BlogPosts => "blog_posts_cache.json",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assets => "assets",
            Self::LinkedEntries => "linked_entries",
            Self::BlogPosts => "blog_posts",
        }
    }
}

impl fmt::Display for CheckpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directory holding the checkpoint files.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    dir: PathBuf,
}

impl CheckpointStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path(&self, kind: CheckpointKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Create an empty checkpoint file for every phase that has none.
    ///
    /// Runs before any migration work so later phases can always assume a
    /// readable store.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::CheckpointIo`] when the directory or a file
    /// cannot be created. Callers treat this as fatal.
    pub fn ensure_exists(&self) -> Result<(), MigrateError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| MigrateError::CheckpointIo {
            path: self.dir.clone(),
            source,
        })?;

        for kind in CheckpointKind::ALL {
            let path = self.path(kind);
            if path.exists() {
                tracing::debug!(checkpoint = %kind, path = %path.display(), "checkpoint file present");
                continue;
            }
            tracing::info!(checkpoint = %kind, path = %path.display(), "creating empty checkpoint file");
            write_atomically(&path, b"{}")?;
        }
        Ok(())
    }

    /// Load a phase's map, treating a missing or unreadable file as empty.
    ///
    /// Absence is normal on a first run; this never fails the caller.
    #[must_use]
    pub fn load<V: DeserializeOwned>(&self, kind: CheckpointKind) -> Checkpoint<V> {
        match self.load_strict(kind) {
            Ok(checkpoint) => {
                tracing::info!(checkpoint = %kind, entries = checkpoint.len(), "loaded checkpoint");
                checkpoint
            }
            Err(error) => {
                tracing::info!(checkpoint = %kind, %error, "no usable checkpoint, starting empty");
                Checkpoint::empty(kind, self.path(kind))
            }
        }
    }

    /// Load a phase's map, failing if it is missing or malformed.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::CheckpointIo`] or
    /// [`MigrateError::CheckpointFormat`].
    pub fn load_strict<V: DeserializeOwned>(
        &self,
        kind: CheckpointKind,
    ) -> Result<Checkpoint<V>, MigrateError> {
        let path = self.path(kind);
        let raw = std::fs::read_to_string(&path).map_err(|source| MigrateError::CheckpointIo {
            path: path.clone(),
            source,
        })?;
        let entries = if raw.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&raw).map_err(|source| MigrateError::CheckpointFormat {
                path: path.clone(),
                source,
            })?
        };
        Ok(Checkpoint {
            kind,
            path,
            entries,
        })
    }

    /// Number of keys in each phase's file, reading leniently.
    #[must_use]
    pub fn summary(&self) -> CheckpointSummary {
        let count = |kind| self.load::<serde_json::Value>(kind).len();
        CheckpointSummary {
            assets: count(CheckpointKind::Assets),
            linked_entries: count(CheckpointKind::LinkedEntries),
            blog_posts: count(CheckpointKind::BlogPosts),
        }
    }
}

/// Key counts per checkpoint file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckpointSummary {
    pub assets: usize,
    pub linked_entries: usize,
    pub blog_posts: usize,
}

/// In-memory view of one phase's checkpoint, bound to its file.
#[derive(Debug, Clone)]
pub struct Checkpoint<V> {
    kind: CheckpointKind,
    path: PathBuf,
    entries: BTreeMap<String, V>,
}

impl<V> Checkpoint<V> {
    fn empty(kind: CheckpointKind, path: PathBuf) -> Self {
        Self {
            kind,
            path,
            entries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> CheckpointKind {
        self.kind
    }

    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn put(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V: Serialize> Checkpoint<V> {
    /// Write the entire map to disk before returning.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::CheckpointIo`] when the file cannot be written.
    pub fn flush(&self) -> Result<(), MigrateError> {
        let json = serde_json::to_vec_pretty(&self.entries).map_err(|source| {
            MigrateError::CheckpointFormat {
                path: self.path.clone(),
                source,
            }
        })?;
        write_atomically(&self.path, &json)
    }

    /// [`Self::put`] followed by [`Self::flush`].
    ///
    /// # Errors
    ///
    /// See [`Self::flush`].
    pub fn record(&mut self, key: impl Into<String>, value: V) -> Result<(), MigrateError> {
        self.put(key, value);
        self.flush()
    }
}

/// Write via a sibling temp file and rename, so a crash mid-write never
/// leaves a truncated checkpoint behind.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), MigrateError> {
    let io_err = |source| MigrateError::CheckpointIo {
        path: path.to_path_buf(),
        source,
    };
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, contents).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)
}
