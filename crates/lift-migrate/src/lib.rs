//! # lift-migrate
//!
//! Resumable, rate-limited migration of exported blog posts into the CMS.
//!
//! A run moves through four phases, each guarded by its own checkpoint file:
//!
//! 1. [`resolver`]: bind every image URL to a remote asset by file name.
//! 2. [`linked`]: create and publish the SEO, product info, and scores
//!    entries for each post.
//! 3. [`assemble`]: build composite blog posts from the two id maps, without
//!    remote calls.
//! 4. [`publish`]: create and publish each blog post, keyed by slug.
//!
//! [`Migrator`] drives the phases. [`featured`], [`notes`], and [`purge`]
//! are follow-up maintenance passes over an already-migrated environment.

pub mod assemble;
pub mod checkpoint;
pub mod driver;
pub mod error;
pub mod featured;
pub mod linked;
pub mod notes;
pub mod publish;
pub mod purge;
pub mod report;
pub mod resolver;
pub mod retry;
pub mod session;
pub mod source;
mod update;

#[cfg(test)]
pub(crate) mod test_support;

pub use checkpoint::{Checkpoint, CheckpointKind, CheckpointStore, CheckpointSummary};
pub use driver::Migrator;
pub use error::MigrateError;
pub use report::{MigrationReport, PhaseReport};
pub use retry::RetryPolicy;
pub use session::Session;
