use std::sync::Arc;

use anyhow::Context;
use lift_cms::CmsClient;
use lift_config::LiftConfig;
use lift_migrate::Session;

/// Build the run's session over a management API client.
pub fn connect(config: &LiftConfig) -> anyhow::Result<Session> {
    let cms = config.require_cms().context(
        "CMS credentials missing: set cms.management_token and cms.space_id \
         (or CONTENTFUL_MANAGEMENT_TOKEN and CONTENTFUL_SPACE_ID)",
    )?;
    let client = CmsClient::new(cms).context("failed to build management API client")?;
    tracing::debug!(
        space = %cms.space_id,
        environment = %cms.environment,
        locale = %cms.locale,
        "connected session"
    );
    Ok(Session::from_config(config, Arc::new(client)))
}
