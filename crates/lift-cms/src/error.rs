//! Content store error types.

use thiserror::Error;

/// Errors that can occur when talking to the remote content store.
#[derive(Debug, Error)]
pub enum CmsError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned 429 Too Many Requests.
    #[error("rate limited - retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the API asked us to wait.
        retry_after_secs: u64,
    },

    /// The record changed remotely since it was fetched (409 Conflict).
    #[error("version conflict: {message}")]
    VersionConflict {
        /// Error message or response body.
        message: String,
    },

    /// An uploaded asset did not finish processing in time.
    #[error("asset {asset_id} was not processed after {polls} polls")]
    Processing {
        /// Remote id of the asset.
        asset_id: String,
        /// Number of status polls performed.
        polls: u32,
    },

    /// Client settings are unusable (e.g. a token with invalid characters).
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl CmsError {
    /// Whether this failure belongs to the rate-limit class.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Whether this failure belongs to the version-conflict class.
    #[must_use]
    pub const fn is_version_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }

    /// Whether the API reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
