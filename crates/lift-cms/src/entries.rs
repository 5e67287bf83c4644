//! Entry endpoints.

use serde_json::json;

use crate::client::{CMA_CONTENT_TYPE, CONTENT_TYPE_HEADER, CmsClient, VERSION_HEADER};
use crate::error::CmsError;
use crate::http::check_response;
use crate::types::{Collection, Entry, EntryQuery, Fields};

impl CmsClient {
    pub(crate) async fn post_entry(
        &self,
        content_type: &str,
        fields: Fields,
    ) -> Result<Entry, CmsError> {
        let resp = self
            .http
            .post(self.url("/entries"))
            .header(reqwest::header::CONTENT_TYPE, CMA_CONTENT_TYPE)
            .header(CONTENT_TYPE_HEADER, content_type)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        Ok(check_response(resp).await?.json().await?)
    }

    pub(crate) async fn put_published(&self, entry: &Entry) -> Result<Entry, CmsError> {
        let resp = self
            .http
            .put(self.url(&format!("/entries/{}/published", entry.id())))
            .header(VERSION_HEADER, entry.sys.version)
            .send()
            .await?;
        Ok(check_response(resp).await?.json().await?)
    }

    pub(crate) async fn delete_published(&self, entry: &Entry) -> Result<Entry, CmsError> {
        let resp = self
            .http
            .delete(self.url(&format!("/entries/{}/published", entry.id())))
            .header(VERSION_HEADER, entry.sys.version)
            .send()
            .await?;
        Ok(check_response(resp).await?.json().await?)
    }

    pub(crate) async fn fetch_entry(&self, id: &str) -> Result<Entry, CmsError> {
        let resp = self
            .http
            .get(self.url(&format!("/entries/{}", urlencoding::encode(id))))
            .send()
            .await?;
        Ok(check_response(resp).await?.json().await?)
    }

    pub(crate) async fn put_entry(&self, entry: &Entry) -> Result<Entry, CmsError> {
        let resp = self
            .http
            .put(self.url(&format!("/entries/{}", entry.id())))
            .header(reqwest::header::CONTENT_TYPE, CMA_CONTENT_TYPE)
            .header(VERSION_HEADER, entry.sys.version)
            .json(&json!({ "fields": entry.fields }))
            .send()
            .await?;
        Ok(check_response(resp).await?.json().await?)
    }

    pub(crate) async fn fetch_entries(
        &self,
        query: &EntryQuery,
    ) -> Result<Collection<Entry>, CmsError> {
        let url = self.url(&format!("/entries{}", query.to_query_string()));
        let resp = check_response(self.http.get(&url).send().await?).await?;
        Ok(resp.json().await?)
    }

    pub(crate) async fn remove_entry(&self, entry: &Entry) -> Result<(), CmsError> {
        let resp = self
            .http
            .delete(self.url(&format!("/entries/{}", entry.id())))
            .header(VERSION_HEADER, entry.sys.version)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }
}
