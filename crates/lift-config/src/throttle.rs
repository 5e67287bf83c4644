//! Fixed inter-request delays that cap throughput independently of backoff.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const fn default_lookup_ms() -> u64 {
    100
}

const fn default_upload_ms() -> u64 {
    1_000
}

const fn default_publish_ms() -> u64 {
    2_000
}

const fn default_update_ms() -> u64 {
    1_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThrottleConfig {
    /// Pause after each asset lookup.
    #[serde(default = "default_lookup_ms")]
    pub lookup_ms: u64,

    /// Pause after each asset upload.
    #[serde(default = "default_upload_ms")]
    pub upload_ms: u64,

    /// Pause after each top-level post.
    #[serde(default = "default_publish_ms")]
    pub publish_ms: u64,

    /// Pause after each entry rewritten by a maintenance command.
    #[serde(default = "default_update_ms")]
    pub update_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            lookup_ms: default_lookup_ms(),
            upload_ms: default_upload_ms(),
            publish_ms: default_publish_ms(),
            update_ms: default_update_ms(),
        }
    }
}

impl ThrottleConfig {
    pub const fn lookup(&self) -> Duration {
        Duration::from_millis(self.lookup_ms)
    }

    pub const fn upload(&self) -> Duration {
        Duration::from_millis(self.upload_ms)
    }

    pub const fn publish(&self) -> Duration {
        Duration::from_millis(self.publish_ms)
    }

    pub const fn update(&self) -> Duration {
        Duration::from_millis(self.update_ms)
    }

    /// All delays zeroed. Used by tests and dry local runs.
    pub const fn none() -> Self {
        Self {
            lookup_ms: 0,
            upload_ms: 0,
            publish_ms: 0,
            update_ms: 0,
        }
    }
}
