//! The content store contract consumed by the migration core.
//!
//! Every operation either succeeds or fails with a [`CmsError`] whose class
//! (rate limit, version conflict, other) drives the caller's retry policy.

use async_trait::async_trait;

use crate::error::CmsError;
use crate::types::{Asset, Collection, Entry, EntryQuery, Fields, NewAsset};

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Assets whose stored file name equals `file_name`.
    async fn lookup_assets_by_filename(&self, file_name: &str) -> Result<Vec<Asset>, CmsError>;

    /// Create a draft asset pointing at a remote upload URL.
    async fn create_asset(&self, asset: &NewAsset) -> Result<Asset, CmsError>;

    /// Start processing the asset's file for the configured locale.
    async fn process_asset(&self, asset: &Asset) -> Result<(), CmsError>;

    /// Poll asset `id` until processing produced a hosted file URL. Returns
    /// the asset at its post-processing version.
    async fn await_processed_asset(&self, id: &str) -> Result<Asset, CmsError>;

    /// Publish the asset at its current version.
    async fn publish_asset(&self, asset: &Asset) -> Result<Asset, CmsError>;

    /// Create a draft entry of `content_type`.
    async fn create_entry(&self, content_type: &str, fields: Fields) -> Result<Entry, CmsError>;

    /// Publish the entry at its current version.
    async fn publish_entry(&self, entry: &Entry) -> Result<Entry, CmsError>;

    async fn get_entry(&self, id: &str) -> Result<Entry, CmsError>;

    /// Write the entry's fields back. Fails with a version conflict when the
    /// remote record moved past `entry.sys.version`.
    async fn update_entry(&self, entry: &Entry) -> Result<Entry, CmsError>;

    async fn list_entries(&self, query: &EntryQuery) -> Result<Collection<Entry>, CmsError>;

    async fn unpublish_entry(&self, entry: &Entry) -> Result<Entry, CmsError>;

    async fn delete_entry(&self, entry: &Entry) -> Result<(), CmsError>;
}
