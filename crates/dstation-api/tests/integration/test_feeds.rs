//! Integration tests for RSS feed and File Station operations

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use dstation_core::domain::{DsError, FeedId, Pagination};
use dstation_core::ports::IStationGateway;

use crate::common;

const RSS_SITE_PATH: &str = "/webapi/DownloadStation/RSSsite.cgi";
const RSS_FEED_PATH: &str = "/webapi/DownloadStation/RSSfeed.cgi";
const ENTRY_PATH: &str = "/webapi/entry.cgi";

#[tokio::test]
async fn test_list_feeds_maps_numeric_ids() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path(RSS_SITE_PATH))
        .and(query_param("api", "SYNO.DownloadStation.RSS.Site"))
        .and(query_param("method", "list"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::ok_envelope(serde_json::json!({
                "sites": [
                    {"id": 1, "title": "ISOs", "url": "https://example.org/a.rss", "last_update": 1_700_000_000},
                    {"id": 2, "title": "Podcasts", "url": "https://example.org/b.rss", "last_update": 0}
                ]
            }))),
        )
        .mount(&server)
        .await;

    let feeds = gateway.list_feeds().await.unwrap();
    assert_eq!(feeds.len(), 2);
    assert_eq!(feeds[0].id.as_str(), "1");
    assert!(feeds[0].last_update.is_some());
    assert!(feeds[1].last_update.is_none());
}

#[tokio::test]
async fn test_feed_items_forward_pagination_verbatim() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path(RSS_FEED_PATH))
        .and(query_param("api", "SYNO.DownloadStation.RSS.Feed"))
        .and(query_param("id", "7"))
        .and(query_param("offset", "40"))
        .and(query_param("limit", "20"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::ok_envelope(serde_json::json!({
                "items": [
                    {"title": "Episode 41", "download_uri": "https://example.org/41.torrent", "time": 1_700_000_100}
                ],
                "total": 120
            }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let feed = FeedId::new("7".to_string()).unwrap();
    let page = gateway
        .list_feed_items(&feed, Pagination::new(40, 20).unwrap())
        .await
        .unwrap();
    assert_eq!(page.total, 120);
    assert_eq!(page.offset, 40);
    assert_eq!(page.items[0].title, "Episode 41");
    assert_eq!(page.items[0].link, "https://example.org/41.torrent");
}

#[tokio::test]
async fn test_refresh_feed_failure_carries_feed_id() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path(RSS_SITE_PATH))
        .and(query_param("method", "refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::err_envelope(100)))
        .mount(&server)
        .await;

    let feed = FeedId::new("7".to_string()).unwrap();
    let result = gateway.refresh_feed(&feed).await;
    assert_eq!(result.unwrap_err(), DsError::FeedRefreshFailed(feed));
}

#[tokio::test]
async fn test_refresh_feed_session_expiry_is_not_masked() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path(RSS_SITE_PATH))
        .and(query_param("method", "refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::err_envelope(105)))
        .mount(&server)
        .await;

    let feed = FeedId::new("7".to_string()).unwrap();
    assert_eq!(
        gateway.refresh_feed(&feed).await.unwrap_err(),
        DsError::SessionExpired
    );
}

#[tokio::test]
async fn test_list_folder_maps_path_errors() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path(ENTRY_PATH))
        .and(query_param("api", "SYNO.FileStation.List"))
        .and(query_param("method", "list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::err_envelope(408)))
        .mount(&server)
        .await;

    let result = gateway.list_folder("/missing").await;
    assert_eq!(result.unwrap_err(), DsError::PathNotFound("/missing".to_string()));
}

#[tokio::test]
async fn test_list_shares_and_folder_contents() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path(ENTRY_PATH))
        .and(query_param("method", "list_share"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::ok_envelope(serde_json::json!({
                "shares": [{"name": "downloads", "path": "/downloads"}]
            }))),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ENTRY_PATH))
        .and(query_param("method", "list"))
        .and(query_param("folder_path", "/downloads"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::ok_envelope(serde_json::json!({
                "files": [{
                    "name": "iso", "path": "/downloads/iso", "isdir": true
                }, {
                    "name": "a.torrent", "path": "/downloads/a.torrent", "isdir": false,
                    "additional": {"size": 90_000, "time": {"mtime": 1_700_000_000}}
                }]
            }))),
        )
        .mount(&server)
        .await;

    let shares = gateway.list_shares().await.unwrap();
    assert_eq!(shares[0].path, "/downloads");

    let items = gateway.list_folder("/downloads").await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items[0].is_directory);
    assert_eq!(items[1].size, Some(90_000));
}

#[tokio::test]
async fn test_create_folder_returns_created_entry() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path(ENTRY_PATH))
        .and(query_param("api", "SYNO.FileStation.CreateFolder"))
        .and(query_param("method", "create"))
        .and(query_param("folder_path", "/downloads"))
        .and(query_param("name", "films"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::ok_envelope(serde_json::json!({
                "folders": [{"name": "films", "path": "/downloads/films", "isdir": true}]
            }))),
        )
        .mount(&server)
        .await;

    let item = gateway.create_folder("/downloads", "films").await.unwrap();
    assert_eq!(item.path, "/downloads/films");
    assert!(item.is_directory);
}
