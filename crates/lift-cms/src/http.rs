//! Shared HTTP response helpers for the management API client.
//!
//! Centralizes status-code classification (429 rate limiting, 409 version
//! conflicts, non-success → [`CmsError::Api`]) so the asset and entry modules
//! stay focused on request construction and response mapping.

use crate::error::CmsError;

/// Rate-limit reset header sent by the management API.
const RATE_LIMIT_RESET: &str = "x-contentful-ratelimit-reset";

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`CmsError::RateLimited`], reading the
///   reset header or `Retry-After` (falls back to 60 s if both are absent
///   or unparseable).
/// - **409 Conflict** → [`CmsError::VersionConflict`].
/// - **Non-success status** → [`CmsError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, CmsError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(CmsError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if resp.status() == 409 {
        return Err(CmsError::VersionConflict {
            message: resp.text().await.unwrap_or_default(),
        });
    }
    if !resp.status().is_success() {
        return Err(CmsError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the reset or `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    let headers = resp.headers();
    headers
        .get(RATE_LIMIT_RESET)
        .or_else(|| headers.get(reqwest::header::RETRY_AFTER))
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(60)
}
