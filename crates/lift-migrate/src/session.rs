//! The explicit per-run session handle.

use std::sync::Arc;
use std::time::Duration;

use lift_cms::ContentStore;
use lift_config::{LiftConfig, RetryConfig, ThrottleConfig};

use crate::checkpoint::CheckpointStore;
use crate::retry::RetryPolicy;

/// Everything a migration step needs: the remote store, target locale,
/// checkpoint location, retry policies, and throughput delays.
///
/// Built once at startup and passed by reference into every phase.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn ContentStore>,
    locale: String,
    checkpoints: CheckpointStore,
    /// Rate-limit policy for reads and lookups.
    pub lookup: RetryPolicy,
    /// Rate-limit policy for creates, publishes, and updates.
    pub write: RetryPolicy,
    /// Attempts for fetch-modify-update sequences on version conflicts.
    pub version_conflict_attempts: u32,
    pub throttle: ThrottleConfig,
    /// Create assets that no remote file name matches.
    pub upload_missing_assets: bool,
}

impl Session {
    /// Session with default retry policies and throttling.
    #[must_use]
    pub fn new(
        store: Arc<dyn ContentStore>,
        locale: impl Into<String>,
        checkpoints: CheckpointStore,
    ) -> Self {
        Self {
            store,
            locale: locale.into(),
            checkpoints,
            lookup: RetryConfig::default().lookup.into(),
            write: RetryConfig::default().write.into(),
            version_conflict_attempts: RetryConfig::default().version_conflict_attempts,
            throttle: ThrottleConfig::default(),
            upload_missing_assets: false,
        }
    }

    #[must_use]
    pub fn from_config(config: &LiftConfig, store: Arc<dyn ContentStore>) -> Self {
        Self::new(
            store,
            config.cms.locale.clone(),
            CheckpointStore::new(&config.migration.checkpoint_dir),
        )
        .with_retry(&config.retry)
        .with_throttle(config.throttle.clone())
        .with_upload_missing_assets(config.migration.upload_missing_assets)
    }

    #[must_use]
    pub fn with_retry(mut self, retry: &RetryConfig) -> Self {
        self.lookup = retry.lookup.into();
        self.write = retry.write.into();
        self.version_conflict_attempts = retry.version_conflict_attempts;
        self
    }

    #[must_use]
    pub fn with_throttle(mut self, throttle: ThrottleConfig) -> Self {
        self.throttle = throttle;
        self
    }

    #[must_use]
    pub const fn with_upload_missing_assets(mut self, upload: bool) -> Self {
        self.upload_missing_assets = upload;
        self
    }

    #[must_use]
    pub fn store(&self) -> &dyn ContentStore {
        self.store.as_ref()
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[must_use]
    pub const fn checkpoints(&self) -> &CheckpointStore {
        &self.checkpoints
    }
}

/// Sleep for a throughput-shaping delay. Zero is a no-op.
pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
