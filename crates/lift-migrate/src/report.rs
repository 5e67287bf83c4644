//! Per-phase and per-run outcome counters.

use lift_core::enums::MigrationPhase;
use serde::Serialize;

/// What happened to each unit a phase looked at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    /// Units whose work was done during this run.
    pub completed: usize,
    /// Units already checkpointed by an earlier run.
    pub skipped: usize,
    /// Units with no remote match and no way to create one.
    pub missed: usize,
    /// Units abandoned after an error.
    pub failed: usize,
}

impl PhaseReport {
    /// Units looked at, in any outcome.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.completed + self.skipped + self.missed + self.failed
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.missed == 0 && self.failed == 0
    }
}

/// Outcome of a full migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Last phase the run reached.
    pub phase: MigrationPhase,
    pub assets: PhaseReport,
    pub linked_entries: PhaseReport,
    pub assembled: PhaseReport,
    pub posts: PhaseReport,
}

impl Default for MigrationReport {
    fn default() -> Self {
        Self {
            phase: MigrationPhase::Pending,
            assets: PhaseReport::default(),
            linked_entries: PhaseReport::default(),
            assembled: PhaseReport::default(),
            posts: PhaseReport::default(),
        }
    }
}

impl MigrationReport {
    /// Records abandoned after an error, across all phases.
    #[must_use]
    pub const fn failures(&self) -> usize {
        self.assets.failed + self.linked_entries.failed + self.assembled.failed + self.posts.failed
    }
}
