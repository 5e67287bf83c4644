//! Asset resolution by file name.
//!
//! The export never recorded remote asset ids, so each image URL is matched
//! against the remote store by its final path segment. Bindings are keyed by
//! source URL in the asset checkpoint; two URLs sharing a file name resolve
//! to the same asset.

use std::collections::HashSet;

use lift_cms::{Asset, CmsError, NewAsset};
use lift_core::coerce::content_key;
use lift_core::entities::Post;

use crate::checkpoint::Checkpoint;
use crate::report::PhaseReport;
use crate::retry::with_backoff;
use crate::session::{Session, pause};

const DEFAULT_ASSET_TITLE: &str = "Untitled";
const DEFAULT_ASSET_CONTENT_TYPE: &str = "image/jpeg";

/// An image the export refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub url: String,
    pub title: Option<String>,
    pub file_name: Option<String>,
}

impl AssetDescriptor {
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            file_name: None,
        }
    }
}

/// Unique image descriptors across `posts`, in first-seen order.
///
/// Covers photo images and SEO featured images. Missing or empty URLs are
/// ignored.
#[must_use]
pub fn collect_descriptors(posts: &[Post]) -> Vec<AssetDescriptor> {
    let mut seen = HashSet::new();
    let mut descriptors = Vec::new();

    for post in posts {
        let photos = post.photos.iter().filter_map(|photo| photo.image.as_ref());
        for image in photos {
            let Some(url) = image.url.as_deref().filter(|u| !u.is_empty()) else {
                continue;
            };
            if seen.insert(url.to_string()) {
                descriptors.push(AssetDescriptor {
                    url: url.to_string(),
                    title: image.title.clone(),
                    file_name: image.filename.clone(),
                });
            }
        }

        if let Some(url) = post.seo.featured_image.as_deref().filter(|u| !u.is_empty())
            && seen.insert(url.to_string())
        {
            descriptors.push(AssetDescriptor::from_url(url));
        }
    }
    descriptors
}

/// Asset id bound to `url`, directly or through another URL with the same
/// content key.
#[must_use]
pub fn bound_asset<'a>(assets: &'a Checkpoint<String>, url: &str) -> Option<&'a str> {
    if let Some(id) = assets.get(url) {
        return Some(id);
    }
    let key = content_key(url)?;
    assets
        .iter()
        .find(|(bound_url, _)| content_key(bound_url) == Some(key))
        .map(|(_, id)| id.as_str())
}

enum Resolution {
    Found(String),
    Created(String),
    Missing,
}

/// Bind every descriptor not yet in `assets` to a remote asset id.
///
/// Each new binding is flushed before the next descriptor is looked at.
/// Misses and failures are logged and left for the next run.
pub async fn resolve_assets(
    session: &Session,
    descriptors: &[AssetDescriptor],
    assets: &mut Checkpoint<String>,
) -> PhaseReport {
    let mut report = PhaseReport::default();

    for descriptor in descriptors {
        let url = descriptor.url.as_str();
        if assets.has(url) {
            report.skipped += 1;
            continue;
        }
        let Some(key) = content_key(url) else {
            tracing::warn!(url, "image URL has no file name, skipping");
            report.missed += 1;
            continue;
        };

        // A sibling URL with the same file name was already resolved.
        if let Some(id) = bound_asset(assets, url).map(str::to_string) {
            tracing::debug!(url, asset_id = %id, "reusing binding for same file name");
            bind(assets, url, id, &mut report);
            continue;
        }

        match resolve_one(session, descriptor, key).await {
            Ok(Resolution::Found(id)) => {
                tracing::info!(url, asset_id = %id, "found existing asset");
                bind(assets, url, id, &mut report);
            }
            Ok(Resolution::Created(id)) => {
                tracing::info!(url, asset_id = %id, "uploaded and published asset");
                bind(assets, url, id, &mut report);
            }
            Ok(Resolution::Missing) => {
                tracing::warn!(url, file_name = key, "no asset found for file name");
                report.missed += 1;
            }
            Err(error) => {
                tracing::error!(url, %error, "failed to resolve asset");
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        resolved = report.completed,
        cached = report.skipped,
        missed = report.missed,
        failed = report.failed,
        "asset resolution finished"
    );
    report
}

fn bind(assets: &mut Checkpoint<String>, url: &str, id: String, report: &mut PhaseReport) {
    match assets.record(url, id) {
        Ok(()) => report.completed += 1,
        Err(error) => {
            tracing::error!(url, %error, "failed to save asset checkpoint");
            report.failed += 1;
        }
    }
}

async fn resolve_one(
    session: &Session,
    descriptor: &AssetDescriptor,
    key: &str,
) -> Result<Resolution, CmsError> {
    let store = session.store();
    let found = with_backoff(&session.lookup, "lookup asset", || {
        store.lookup_assets_by_filename(key)
    })
    .await;
    pause(session.throttle.lookup()).await;

    if let Some(asset) = found?.into_iter().next() {
        return Ok(Resolution::Found(asset.sys.id));
    }
    if !session.upload_missing_assets {
        return Ok(Resolution::Missing);
    }

    let asset = upload(session, descriptor, key).await;
    pause(session.throttle.upload()).await;
    Ok(Resolution::Created(asset?.sys.id))
}

async fn upload(
    session: &Session,
    descriptor: &AssetDescriptor,
    key: &str,
) -> Result<Asset, CmsError> {
    let store = session.store();
    let new_asset = NewAsset {
        title: descriptor
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_ASSET_TITLE.to_string()),
        file_name: descriptor
            .file_name
            .clone()
            .unwrap_or_else(|| key.to_string()),
        content_type: DEFAULT_ASSET_CONTENT_TYPE.to_string(),
        upload_url: descriptor.url.clone(),
    };

    let draft = with_backoff(&session.write, "create asset", || store.create_asset(&new_asset)).await?;
    with_backoff(&session.write, "process asset", || store.process_asset(&draft)).await?;
    // Processing bumps the version; publish must use the polled one.
    let processed = with_backoff(&session.lookup, "poll asset", || {
        store.await_processed_asset(draft.id())
    })
    .await?;
    with_backoff(&session.write, "publish asset", || store.publish_asset(&processed)).await
}
