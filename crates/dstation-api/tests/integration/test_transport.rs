//! Integration tests for the raw transport layer

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dstation_api::transport::{
    MultipartFile, ProgressFn, ReqwestTransport, Transport, TransportError,
};
use dstation_core::domain::{CreateTaskRequest, DsError, TorrentFile};
use dstation_core::ports::IStationGateway;

use crate::common;

fn transport() -> ReqwestTransport {
    ReqwestTransport::with_default_timeouts().unwrap()
}

fn url(server: &MockServer, path: &str) -> Url {
    Url::parse(&format!("{}{path}", server.uri())).unwrap()
}

#[tokio::test]
async fn test_non_2xx_status_is_an_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = transport().get(url(&server, "/gone")).await.unwrap_err();
    assert!(matches!(err, TransportError::Http { status: 404 }));
}

#[tokio::test]
async fn test_server_errors_map_to_unreachable_at_the_gateway() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    assert_eq!(gateway.list_tasks().await.unwrap_err(), DsError::ServerUnreachable);
}

#[tokio::test]
async fn test_timeout_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let slow = ReqwestTransport::new(Duration::from_millis(200), Duration::from_secs(1)).unwrap();
    let err = slow.get(url(&server, "/")).await.unwrap_err();
    assert!(matches!(err, TransportError::Timeout));
}

#[tokio::test]
async fn test_post_form_sends_urlencoded_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webapi/auth.cgi"))
        .and(body_string_contains("account=admin"))
        .and(body_string_contains("passwd=hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::ok_empty_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = transport()
        .post_form(
            url(&server, "/webapi/auth.cgi"),
            "account=admin&passwd=hunter2".to_string(),
        )
        .await
        .unwrap();
    assert!(!bytes.is_empty());
}

#[tokio::test]
async fn test_multipart_upload_carries_file_and_fields() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("POST"))
        .and(path("/webapi/DownloadStation/task.cgi"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"linux.torrent\""))
        .and(body_string_contains("SYNO.DownloadStation.Task"))
        .and(body_string_contains("downloads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::ok_empty_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateTaskRequest {
        uri: None,
        file: Some(TorrentFile {
            name: "linux.torrent".to_string(),
            bytes: b"d8:announce0:e".to_vec(),
        }),
        destination: Some("downloads".to_string()),
    };
    gateway.create_task(&request).await.unwrap();
}

#[tokio::test]
async fn test_download_progress_fires_and_finishes_with_totals() {
    let server = MockServer::start().await;
    let body = vec![0u8; 200 * 1024];
    Mock::given(method("GET"))
        .and(path("/blob"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-length", body.len().to_string().as_str())
                .set_body_bytes(body.clone()),
        )
        .mount(&server)
        .await;

    let calls = Arc::new(AtomicU32::new(0));
    let final_received = Arc::new(AtomicU64::new(0));
    let progress: ProgressFn = {
        let calls = calls.clone();
        let final_received = final_received.clone();
        Box::new(move |received, total| {
            calls.fetch_add(1, Ordering::SeqCst);
            final_received.store(received, Ordering::SeqCst);
            assert_eq!(total, 200 * 1024);
        })
    };

    let bytes = transport()
        .download_with_progress(url(&server, "/blob"), Some(&progress))
        .await
        .unwrap();

    assert_eq!(bytes.len(), 200 * 1024);
    assert!(calls.load(Ordering::SeqCst) >= 1);
    assert_eq!(final_received.load(Ordering::SeqCst), 200 * 1024);
}

#[tokio::test]
async fn test_small_download_still_fires_final_progress() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blob"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 1024]))
        .mount(&server)
        .await;

    // 1KB is below the reporting granularity; only the completion
    // callback fires, with the final totals
    let calls = Arc::new(AtomicU32::new(0));
    let progress: ProgressFn = {
        let calls = calls.clone();
        Box::new(move |received, _total| {
            calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(received, 1024);
        })
    };

    let bytes = transport()
        .download_with_progress(url(&server, "/blob"), Some(&progress))
        .await
        .unwrap();
    assert_eq!(bytes.len(), 1024);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
