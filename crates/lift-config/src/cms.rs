//! Remote content store (management API) configuration.

use serde::{Deserialize, Serialize};

fn default_environment() -> String {
    "master".to_string()
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_base_url() -> String {
    "https://api.contentful.com".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CmsConfig {
    /// Management API access token.
    #[serde(default)]
    pub management_token: String,

    /// Target space id.
    #[serde(default)]
    pub space_id: String,

    /// Target environment within the space.
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Locale tag selecting which localized field slot is read and written.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Management API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            management_token: String::new(),
            space_id: String::new(),
            environment: default_environment(),
            locale: default_locale(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CmsConfig {
    /// Check if the credentials needed for remote access are present.
    pub fn is_configured(&self) -> bool {
        !self.management_token.is_empty() && !self.space_id.is_empty()
    }

    /// Base URL of the configured environment, without a trailing slash.
    ///
    /// `{base_url}/spaces/{space_id}/environments/{environment}`
    pub fn environment_url(&self) -> String {
        format!(
            "{}/spaces/{}/environments/{}",
            self.base_url.trim_end_matches('/'),
            self.space_id,
            self.environment
        )
    }
}
