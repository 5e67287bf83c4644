//! Bounded retry for remote calls.
//!
//! Two independent policies:
//! - [`with_backoff`] retries a single call on rate-limit failures, sleeping a
//!   doubling delay between attempts. Lookups and writes use separately
//!   configured [`RetryPolicy`] values.
//! - [`with_version_retry`] re-runs a whole fetch-modify-update sequence when
//!   the remote record moved underneath it.
//!
//! Any other failure class propagates immediately.

use std::future::Future;
use std::time::Duration;

use lift_cms::CmsError;
use lift_config::BackoffConfig;

/// Rate-limit retry parameters for one class of remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Maximum number of attempts, including the initial one.
    pub max_attempts: u32,
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(base_delay: Duration, max_attempts: u32) -> Self {
        Self {
            base_delay,
            max_attempts,
        }
    }

    /// Delays slept before each retry, in order. One fewer than
    /// `max_attempts`, each double the previous.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let retries = self.max_attempts.max(1) - 1;
        std::iter::successors(Some(self.base_delay), |d| Some(d.saturating_mul(2)))
            .take(retries as usize)
    }
}

impl From<BackoffConfig> for RetryPolicy {
    fn from(config: BackoffConfig) -> Self {
        Self::new(config.base_delay(), config.max_attempts)
    }
}

/// Run `op`, retrying on rate-limit failures per `policy`.
///
/// # Errors
///
/// Returns the first non-rate-limit failure unchanged, or the last
/// rate-limit failure once attempts are exhausted.
pub async fn with_backoff<T, F, Fut>(policy: &RetryPolicy, what: &str, mut op: F) -> Result<T, CmsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CmsError>>,
{
    let mut delays = policy.delays();
    let mut attempt = 1u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_rate_limited() => {
                let Some(delay) = delays.next() else {
                    tracing::warn!(what, attempt, "rate limit persisted, giving up");
                    return Err(error);
                };
                tracing::warn!(
                    what,
                    attempt,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "rate limit exceeded, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

/// Run a fetch-modify-update sequence, re-running it from the fetch on
/// version conflicts, at most `attempts` times.
///
/// `op` must re-read the latest record on every call.
///
/// # Errors
///
/// Returns the first non-conflict failure unchanged, or the last conflict
/// once attempts are exhausted.
pub async fn with_version_retry<T, F, Fut>(attempts: u32, what: &str, mut op: F) -> Result<T, CmsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CmsError>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_version_conflict() && attempt < attempts => {
                tracing::info!(what, attempt, "version conflict, refetching");
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
