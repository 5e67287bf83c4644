//! Resource kinds and migration phases for postlift.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! unless they mirror a remote wire value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ResourceKind
// ---------------------------------------------------------------------------

/// Kind of remote resource a link points at.
///
/// Serialized as the remote store's `linkType` value (`Asset` / `Entry`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Asset,
    Entry,
}

impl ResourceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "Asset",
            Self::Entry => "Entry",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MigrationPhase
// ---------------------------------------------------------------------------

/// Progress of a migration run.
///
/// ```text
/// pending → assets_resolved → linked_entries_created → posts_assembled → posts_published
/// ```
///
/// Phases are strictly ordered; there is no rollback transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationPhase {
    Pending,
    AssetsResolved,
    LinkedEntriesCreated,
    PostsAssembled,
    PostsPublished,
}

impl MigrationPhase {
    /// Valid next state from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::AssetsResolved],
            Self::AssetsResolved => &[Self::LinkedEntriesCreated],
            Self::LinkedEntriesCreated => &[Self::PostsAssembled],
            Self::PostsAssembled => &[Self::PostsPublished],
            Self::PostsPublished => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Advance to `next`, rejecting out-of-order transitions.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] when `next` does not directly
    /// follow `self`.
    pub fn advance(self, next: Self) -> Result<Self, CoreError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::PostsPublished)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::AssetsResolved => "assets_resolved",
            Self::LinkedEntriesCreated => "linked_entries_created",
            Self::PostsAssembled => "posts_assembled",
            Self::PostsPublished => "posts_published",
        }
    }
}

impl fmt::Display for MigrationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
