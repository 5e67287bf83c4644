//! Backfill of SEO featured images onto already-created SEO entries.

use lift_core::entities::{LinkedEntryIds, Post, ResourceRef};
use serde_json::Value;

use crate::checkpoint::{Checkpoint, CheckpointKind};
use crate::error::MigrateError;
use crate::report::PhaseReport;
use crate::resolver::bound_asset;
use crate::session::Session;
use crate::update::update_and_publish;

/// Point each post's SEO entry at its featured image asset.
///
/// Posts without a checkpointed SEO entry, a featured image URL, or a bound
/// asset are logged and counted as missed.
///
/// # Errors
///
/// Unlike a migration run, the linked-entry and asset checkpoints must
/// already exist and parse; otherwise this fails before any remote call.
pub async fn backfill_featured_images(
    session: &Session,
    posts: &[Post],
) -> Result<PhaseReport, MigrateError> {
    let checkpoints = session.checkpoints();
    let linked: Checkpoint<LinkedEntryIds> =
        checkpoints.load_strict(CheckpointKind::LinkedEntries)?;
    let assets: Checkpoint<String> = checkpoints.load_strict(CheckpointKind::Assets)?;

    let mut report = PhaseReport::default();
    for post in posts {
        let Some(ids) = linked.get(&post.id) else {
            tracing::warn!(post_id = %post.id, "no linked entries recorded for post");
            report.missed += 1;
            continue;
        };
        let Some(url) = post.seo.featured_image.as_deref().filter(|u| !u.is_empty()) else {
            tracing::warn!(post_id = %post.id, "no featured image URL for post");
            report.missed += 1;
            continue;
        };
        let Some(asset_id) = bound_asset(&assets, url) else {
            tracing::warn!(post_id = %post.id, url, "no asset found for featured image");
            report.missed += 1;
            continue;
        };

        let link = serde_json::to_value(ResourceRef::asset(asset_id)).unwrap_or(Value::Null);
        let locale = session.locale();
        let result = update_and_publish(session, &ids.seo_id, |entry| {
            entry.set_field("featured_image", locale, link.clone());
        })
        .await;

        match result {
            Ok(_) => {
                tracing::info!(seo_id = %ids.seo_id, asset_id, "updated SEO featured image");
                report.completed += 1;
            }
            Err(error) => {
                tracing::error!(seo_id = %ids.seo_id, %error, "failed to update SEO entry");
                report.failed += 1;
            }
        }
    }
    Ok(report)
}
