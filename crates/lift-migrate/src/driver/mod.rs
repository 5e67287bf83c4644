//! The phase driver.
//!
//! ```text
//! pending → assets_resolved → linked_entries_created → posts_assembled → posts_published
//! ```
//!
//! Each phase consults its checkpoint before doing remote work and records
//! each finished unit. Per-record failures are logged and counted; only
//! failing to prepare the checkpoint files aborts the run.

use lift_core::entities::{LinkedEntryIds, Post};
use lift_core::enums::MigrationPhase;

use crate::assemble::assemble_posts;
use crate::checkpoint::{Checkpoint, CheckpointKind};
use crate::error::MigrateError;
use crate::linked::create_linked_entries;
use crate::publish::publish_posts;
use crate::report::{MigrationReport, PhaseReport};
use crate::resolver::{collect_descriptors, resolve_assets};
use crate::session::Session;

pub struct Migrator<'a> {
    session: &'a Session,
}

impl<'a> Migrator<'a> {
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Run all phases over `posts`.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::CheckpointIo`] when the checkpoint files cannot
    /// be created.
    pub async fn run(&self, posts: &[Post]) -> Result<MigrationReport, MigrateError> {
        self.run_with(posts, |_, _| {}).await
    }

    /// Like [`Self::run`], calling `on_phase` as each phase completes.
    ///
    /// # Errors
    ///
    /// See [`Self::run`].
    pub async fn run_with<F>(
        &self,
        posts: &[Post],
        mut on_phase: F,
    ) -> Result<MigrationReport, MigrateError>
    where
        F: FnMut(MigrationPhase, &PhaseReport),
    {
        let checkpoints = self.session.checkpoints();
        checkpoints.ensure_exists()?;

        let mut assets: Checkpoint<String> = checkpoints.load(CheckpointKind::Assets);
        let mut linked: Checkpoint<LinkedEntryIds> =
            checkpoints.load(CheckpointKind::LinkedEntries);
        let mut published: Checkpoint<String> = checkpoints.load(CheckpointKind::BlogPosts);

        let mut report = MigrationReport::default();

        let descriptors = collect_descriptors(posts);
        tracing::info!(images = descriptors.len(), "resolving assets");
        report.assets = resolve_assets(self.session, &descriptors, &mut assets).await;
        report.phase = report.phase.advance(MigrationPhase::AssetsResolved)?;
        on_phase(report.phase, &report.assets);

        tracing::info!(posts = posts.len(), "creating linked entries");
        report.linked_entries =
            create_linked_entries(self.session, posts, &assets, &mut linked).await;
        report.phase = report.phase.advance(MigrationPhase::LinkedEntriesCreated)?;
        on_phase(report.phase, &report.linked_entries);

        let (blog_posts, assembled) = assemble_posts(posts, &assets, &linked);
        report.assembled = assembled;
        report.phase = report.phase.advance(MigrationPhase::PostsAssembled)?;
        on_phase(report.phase, &report.assembled);

        tracing::info!(posts = blog_posts.len(), "publishing blog posts");
        report.posts = publish_posts(self.session, &blog_posts, &mut published).await;
        report.phase = report.phase.advance(MigrationPhase::PostsPublished)?;
        on_phase(report.phase, &report.posts);

        tracing::info!(
            published = report.posts.completed,
            already_published = report.posts.skipped,
            failures = report.failures(),
            "migration finished"
        );
        Ok(report)
    }
}
