//! `CmsClient` against a mock management API.

use std::time::Duration;

use lift_cms::{CmsClient, CmsError, ContentStore, EntryQuery, LocalizedFields, NewAsset};
use lift_config::CmsConfig;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENV: &str = "/spaces/space1/environments/master";

fn client_for(server: &MockServer) -> CmsClient {
    let config = CmsConfig {
        management_token: "CFPAT-test".into(),
        space_id: "space1".into(),
        base_url: server.uri(),
        ..Default::default()
    };
    CmsClient::new(&config)
        .unwrap()
        .with_processing_poll(Duration::from_millis(1), 3)
}

fn entry_json(id: &str, version: u64) -> serde_json::Value {
    json!({ "sys": { "id": id, "type": "Entry", "version": version }, "fields": {} })
}

#[tokio::test]
async fn lookup_assets_by_filename_sends_query_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ENV}/assets")))
        .and(query_param("fields.file.fileName", "x.jpg"))
        .and(query_param("limit", "1"))
        .and(header("authorization", "Bearer CFPAT-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "items": [{ "sys": { "id": "asset-1", "version": 2 } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let assets = client_for(&server)
        .lookup_assets_by_filename("x.jpg")
        .await
        .unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].id(), "asset-1");
}

#[tokio::test]
async fn create_entry_posts_content_type_and_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{ENV}/entries")))
        .and(header("X-Contentful-Content-Type", "scores"))
        .and(body_partial_json(json!({
            "fields": { "strength": { "en-US": 8 } }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(entry_json("e-1", 1)))
        .expect(1)
        .mount(&server)
        .await;

    let fields = LocalizedFields::new("en-US").with("strength", 8).build();
    let entry = client_for(&server)
        .create_entry("scores", fields)
        .await
        .unwrap();
    assert_eq!(entry.id(), "e-1");
    assert_eq!(entry.sys.version, 1);
}

#[tokio::test]
async fn publish_sends_current_version() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("{ENV}/entries/e-1/published")))
        .and(header("X-Contentful-Version", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sys": { "id": "e-1", "version": 2, "publishedVersion": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let draft = serde_json::from_value(entry_json("e-1", 1)).unwrap();
    let published = client.publish_entry(&draft).await.unwrap();
    assert!(published.is_published());
}

#[tokio::test]
async fn rate_limit_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{ENV}/entries")))
        .respond_with(
            ResponseTemplate::new(429).insert_header("X-Contentful-RateLimit-Reset", "1"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_entry("seo", LocalizedFields::new("en-US").build())
        .await
        .unwrap_err();
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn stale_update_is_a_version_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("{ENV}/entries/e-1")))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "sys": { "type": "Error", "id": "VersionMismatch" }
        })))
        .mount(&server)
        .await;

    let entry = serde_json::from_value(entry_json("e-1", 3)).unwrap();
    let err = client_for(&server).update_entry(&entry).await.unwrap_err();
    assert!(err.is_version_conflict());
}

#[tokio::test]
async fn missing_entry_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ENV}/entries/nope")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server).get_entry("nope").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn asset_upload_processes_polls_and_publishes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{ENV}/assets")))
        .and(body_partial_json(json!({
            "fields": { "file": { "en-US": { "upload": "https://old.example.com/a/x.jpg" } } }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sys": { "id": "asset-9", "version": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{ENV}/assets/asset-9/files/en-US/process")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{ENV}/assets/asset-9")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sys": { "id": "asset-9", "version": 2 },
            "fields": { "file": { "en-US": { "fileName": "x.jpg" } } }
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{ENV}/assets/asset-9")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sys": { "id": "asset-9", "version": 3 },
            "fields": { "file": { "en-US": { "fileName": "x.jpg", "url": "//cdn/x.jpg" } } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{ENV}/assets/asset-9/published")))
        .and(header("X-Contentful-Version", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sys": { "id": "asset-9", "version": 4, "publishedVersion": 3 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let draft = client
        .create_asset(&NewAsset {
            title: "Bud".into(),
            file_name: "x.jpg".into(),
            content_type: "image/jpeg".into(),
            upload_url: "https://old.example.com/a/x.jpg".into(),
        })
        .await
        .unwrap();
    client.process_asset(&draft).await.unwrap();
    let processed = client.await_processed_asset(draft.id()).await.unwrap();
    assert_eq!(processed.sys.version, 3);
    let published = client.publish_asset(&processed).await.unwrap();
    assert_eq!(published.id(), "asset-9");
    assert!(published.is_published());
}

#[tokio::test]
async fn asset_processing_gives_up_after_max_polls() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("{ENV}/assets/slow/files/en-US/process")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{ENV}/assets/slow")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sys": { "id": "slow", "version": 2 }
        })))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let draft: lift_cms::Asset =
        serde_json::from_value(json!({ "sys": { "id": "slow", "version": 1 } })).unwrap();
    client.process_asset(&draft).await.unwrap();
    let err = client.await_processed_asset("slow").await.unwrap_err();
    assert!(matches!(err, CmsError::Processing { polls: 3, .. }));
}

#[tokio::test]
async fn list_entries_filters_by_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ENV}/entries")))
        .and(query_param("content_type", "scores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2,
            "items": [entry_json("s1", 1), entry_json("s2", 1)]
        })))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .list_entries(&EntryQuery {
            content_type: Some("scores".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items[1].id(), "s2");
}
