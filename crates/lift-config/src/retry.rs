//! Retry policies for remote calls.
//!
//! Lookups and writes carry separate rate-limit policies; the values are
//! empirically tuned against the management API and are not derived from
//! each other.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backoff parameters for one class of remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackoffConfig {
    /// Delay before the first retry, in milliseconds. Doubles on each retry.
    pub base_delay_ms: u64,

    /// Maximum number of attempts, including the initial one.
    pub max_attempts: u32,
}

impl BackoffConfig {
    pub const fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

const fn default_lookup() -> BackoffConfig {
    BackoffConfig {
        base_delay_ms: 1_000,
        max_attempts: 5,
    }
}

const fn default_write() -> BackoffConfig {
    BackoffConfig {
        base_delay_ms: 2_000,
        max_attempts: 6,
    }
}

const fn default_version_conflict_attempts() -> u32 {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Rate-limit policy for reads and lookups.
    #[serde(default = "default_lookup")]
    pub lookup: BackoffConfig,

    /// Rate-limit policy for creates, publishes, and updates.
    #[serde(default = "default_write")]
    pub write: BackoffConfig,

    /// Attempts for a fetch-modify-update sequence hitting version conflicts.
    #[serde(default = "default_version_conflict_attempts")]
    pub version_conflict_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            lookup: default_lookup(),
            write: default_write(),
            version_conflict_attempts: default_version_conflict_attempts(),
        }
    }
}
