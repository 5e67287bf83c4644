use anyhow::Context;
use lift_config::LiftConfig;

use crate::cli::GlobalFlags;

/// Load `.env` and the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<LiftConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error).context("failed to load .env file"),
    }

    match &flags.config {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file '{}' does not exist", path.display());
            }
            LiftConfig::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))
        }
        None => LiftConfig::load().context("failed to load configuration"),
    }
}
