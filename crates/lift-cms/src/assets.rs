//! Asset endpoints.

use serde_json::json;

use crate::client::{CMA_CONTENT_TYPE, CmsClient, VERSION_HEADER};
use crate::error::CmsError;
use crate::http::check_response;
use crate::types::{Asset, Collection, NewAsset};

impl CmsClient {
    /// Look up assets by stored file name (at most one result).
    ///
    /// # Errors
    ///
    /// Returns [`CmsError`] if the request fails, the API returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn find_assets_by_filename(&self, file_name: &str) -> Result<Vec<Asset>, CmsError> {
        let url = self.url(&format!(
            "/assets?fields.file.fileName={}&limit=1",
            urlencoding::encode(file_name)
        ));
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let data: Collection<Asset> = resp.json().await?;
        Ok(data.items)
    }

    pub(crate) async fn post_asset(&self, asset: &NewAsset) -> Result<Asset, CmsError> {
        let body = json!({
            "fields": {
                "title": { &self.locale: asset.title },
                "file": {
                    &self.locale: {
                        "contentType": asset.content_type,
                        "fileName": asset.file_name,
                        "upload": asset.upload_url,
                    }
                }
            }
        });
        let resp = self
            .http
            .post(self.url("/assets"))
            .header(reqwest::header::CONTENT_TYPE, CMA_CONTENT_TYPE)
            .json(&body)
            .send()
            .await?;
        Ok(check_response(resp).await?.json().await?)
    }

    pub(crate) async fn put_process(&self, asset: &Asset) -> Result<(), CmsError> {
        let url = self.url(&format!(
            "/assets/{}/files/{}/process",
            asset.id(),
            self.locale
        ));
        let resp = self
            .http
            .put(url)
            .header(VERSION_HEADER, asset.sys.version)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    pub(crate) async fn fetch_asset(&self, id: &str) -> Result<Asset, CmsError> {
        let resp = self.http.get(self.url(&format!("/assets/{id}"))).send().await?;
        Ok(check_response(resp).await?.json().await?)
    }

    /// Poll until processing produced a hosted file URL.
    pub(crate) async fn poll_processed(&self, id: &str) -> Result<Asset, CmsError> {
        for poll in 1..=self.processing_max_polls {
            let asset = self.fetch_asset(id).await?;
            if asset.is_processed(&self.locale) {
                return Ok(asset);
            }
            tracing::debug!(asset_id = id, poll, "asset still processing");
            tokio::time::sleep(self.processing_poll).await;
        }
        Err(CmsError::Processing {
            asset_id: id.to_string(),
            polls: self.processing_max_polls,
        })
    }

    pub(crate) async fn put_asset_published(&self, asset: &Asset) -> Result<Asset, CmsError> {
        let resp = self
            .http
            .put(self.url(&format!("/assets/{}/published", asset.id())))
            .header(VERSION_HEADER, asset.sys.version)
            .send()
            .await?;
        Ok(check_response(resp).await?.json().await?)
    }
}
