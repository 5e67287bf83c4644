//! # lift-config
//!
//! Layered configuration loading for postlift using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`POSTLIFT_*` prefix, `__` as separator)
//! 2. Legacy `CONTENTFUL_*` variables used by the original import scripts
//! 3. Project-level `./postlift.toml`
//! 4. User-level `~/.config/postlift/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `POSTLIFT_CMS__SPACE_ID` -> `cms.space_id`,
//! `POSTLIFT_RETRY__WRITE__BASE_DELAY_MS` -> `retry.write.base_delay_ms`, etc.
//! The legacy names map as follows:
//!
//! | Variable | Key |
//! |---|---|
//! | `CONTENTFUL_MANAGEMENT_TOKEN` | `cms.management_token` |
//! | `CONTENTFUL_SPACE_ID` | `cms.space_id` |
//! | `CONTENTFUL_ENVIRONMENT` | `cms.environment` |
//! | `CONTENTFUL_LOCALE` | `cms.locale` |
//!
//! # Usage
//!
//! ```no_run
//! use lift_config::LiftConfig;
//!
//! let config = LiftConfig::load().expect("config");
//! if config.cms.is_configured() {
//!     println!("locale: {}", config.cms.locale);
//! }
//! ```

mod cms;
mod error;
mod migration;
mod retry;
mod throttle;

pub use cms::CmsConfig;
pub use error::ConfigError;
pub use migration::MigrationConfig;
pub use retry::{BackoffConfig, RetryConfig};
pub use throttle::ThrottleConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Legacy variable names and the config keys they fill.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("CONTENTFUL_MANAGEMENT_TOKEN", "cms.management_token"),
    ("CONTENTFUL_SPACE_ID", "cms.space_id"),
    ("CONTENTFUL_ENVIRONMENT", "cms.environment"),
    ("CONTENTFUL_LOCALE", "cms.locale"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LiftConfig {
    #[serde(default)]
    pub cms: CmsConfig,
    #[serde(default)]
    pub migration: MigrationConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub throttle: ThrottleConfig,
}

impl LiftConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does not read `.env`; the binary loads it before calling this.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment(Path::new("postlift.toml"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load configuration using an explicit project config file.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_from(project_file: &Path) -> Result<Self, ConfigError> {
        Self::figment(project_file)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment(project_file: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        if project_file.exists() {
            figment = figment.merge(Toml::file(project_file));
        }

        // Layer 3: Legacy variables from the original scripts
        let legacy: Vec<&str> = LEGACY_ENV.iter().map(|(var, _)| *var).collect();
        figment = figment.merge(Env::raw().only(&legacy).map(|var| {
            LEGACY_ENV
                .iter()
                .find(|(name, _)| var.as_str().eq_ignore_ascii_case(name))
                .map_or_else(|| var.as_str().into(), |(_, key)| (*key).into())
        }));

        // Layer 4: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("POSTLIFT_").split("__"));

        figment
    }

    /// Fail unless remote credentials are present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for the `cms` section.
    pub fn require_cms(&self) -> Result<&CmsConfig, ConfigError> {
        if self.cms.is_configured() {
            Ok(&self.cms)
        } else {
            Err(ConfigError::NotConfigured {
                section: "cms".to_string(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("postlift").join("config.toml"))
    }
}
