//! HTTP client for the management API.

use std::time::Duration;

use async_trait::async_trait;
use lift_config::CmsConfig;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::error::CmsError;
use crate::store::ContentStore;
use crate::types::{Asset, Collection, Entry, EntryQuery, Fields, NewAsset};

/// Media type expected by the management API for request bodies.
pub(crate) const CMA_CONTENT_TYPE: &str = "application/vnd.contentful.management.v1+json";

/// Header carrying the version an update or publish is based on.
pub(crate) const VERSION_HEADER: &str = "X-Contentful-Version";

/// Header selecting the content type on entry creation.
pub(crate) const CONTENT_TYPE_HEADER: &str = "X-Contentful-Content-Type";

/// Management API client bound to one space environment and locale.
///
/// Constructed once at startup and shared by reference with every
/// component that needs remote access.
pub struct CmsClient {
    pub(crate) http: reqwest::Client,
    pub(crate) environment_url: String,
    pub(crate) locale: String,
    pub(crate) processing_poll: Duration,
    pub(crate) processing_max_polls: u32,
}

impl CmsClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::InvalidConfig`] when the token cannot be used as a
    /// header value, or [`CmsError::Http`] when the HTTP client fails to build.
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.management_token))
            .map_err(|e| CmsError::InvalidConfig(format!("management token: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .user_agent("postlift/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            environment_url: config.environment_url(),
            locale: config.locale.clone(),
            processing_poll: Duration::from_millis(500),
            processing_max_polls: 20,
        })
    }

    /// Override how asset processing is polled.
    #[must_use]
    pub fn with_processing_poll(mut self, interval: Duration, max_polls: u32) -> Self {
        self.processing_poll = interval;
        self.processing_max_polls = max_polls;
        self
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.environment_url)
    }
}

#[async_trait]
impl ContentStore for CmsClient {
    async fn lookup_assets_by_filename(&self, file_name: &str) -> Result<Vec<Asset>, CmsError> {
        self.find_assets_by_filename(file_name).await
    }

    async fn create_asset(&self, asset: &NewAsset) -> Result<Asset, CmsError> {
        self.post_asset(asset).await
    }

    async fn process_asset(&self, asset: &Asset) -> Result<(), CmsError> {
        self.put_process(asset).await
    }

    async fn await_processed_asset(&self, id: &str) -> Result<Asset, CmsError> {
        self.poll_processed(id).await
    }

    async fn publish_asset(&self, asset: &Asset) -> Result<Asset, CmsError> {
        self.put_asset_published(asset).await
    }

    async fn create_entry(&self, content_type: &str, fields: Fields) -> Result<Entry, CmsError> {
        self.post_entry(content_type, fields).await
    }

    async fn publish_entry(&self, entry: &Entry) -> Result<Entry, CmsError> {
        self.put_published(entry).await
    }

    async fn get_entry(&self, id: &str) -> Result<Entry, CmsError> {
        self.fetch_entry(id).await
    }

    async fn update_entry(&self, entry: &Entry) -> Result<Entry, CmsError> {
        self.put_entry(entry).await
    }

    async fn list_entries(&self, query: &EntryQuery) -> Result<Collection<Entry>, CmsError> {
        self.fetch_entries(query).await
    }

    async fn unpublish_entry(&self, entry: &Entry) -> Result<Entry, CmsError> {
        self.delete_published(entry).await
    }

    async fn delete_entry(&self, entry: &Entry) -> Result<(), CmsError> {
        self.remove_entry(entry).await
    }
}
