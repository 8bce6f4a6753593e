//! Integration tests for the client's server binding

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dstation_api::transport::ReqwestTransport;
use dstation_api::DsApiClient;
use dstation_core::domain::{DsError, ServerConfiguration, SessionId};

use crate::common;

const STATISTIC_CGI: &str = "webapi/DownloadStation/statistic.cgi";

fn client() -> Arc<DsApiClient> {
    Arc::new(DsApiClient::new(Arc::new(
        ReqwestTransport::with_default_timeouts().unwrap(),
    )))
}

fn sid() -> SessionId {
    SessionId::new(common::TEST_SID.to_string()).unwrap()
}

async fn mount_statistics(server: &MockServer, speed: u64, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/webapi/DownloadStation/statistic.cgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(delay)
                .set_body_json(common::ok_envelope(serde_json::json!({
                    "speed_download": speed,
                    "speed_upload": 0
                }))),
        )
        .mount(server)
        .await;
}

async fn get_statistics(client: &DsApiClient) -> Result<serde_json::Value, DsError> {
    client
        .fetch(
            STATISTIC_CGI,
            "SYNO.DownloadStation.Statistic",
            "getinfo",
            1,
            &[],
        )
        .await
}

#[tokio::test]
async fn test_rebind_is_invisible_to_the_request_in_flight() {
    let old_server = MockServer::start().await;
    let new_server = MockServer::start().await;
    mount_statistics(&old_server, 1, Duration::from_millis(300)).await;
    mount_statistics(&new_server, 2, Duration::ZERO).await;

    let client = client();
    client
        .configure(&common::mock_server_config(&old_server), Some(sid()))
        .await
        .unwrap();

    // Start a request against the old binding, then rebind mid-flight
    let in_flight = {
        let client = client.clone();
        tokio::spawn(async move { get_statistics(&client).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    client
        .configure(&common::mock_server_config(&new_server), Some(sid()))
        .await
        .unwrap();

    // The in-flight call finished against the server it started with
    let first = in_flight.await.unwrap().unwrap();
    assert_eq!(first["speed_download"], 1);

    // The next call uses the new binding
    let second = get_statistics(&client).await.unwrap();
    assert_eq!(second["speed_download"], 2);
}

#[tokio::test]
async fn test_configure_rejects_bad_server_and_keeps_the_old_binding() {
    let server = MockServer::start().await;
    mount_statistics(&server, 7, Duration::ZERO).await;

    let client = client();
    client
        .configure(&common::mock_server_config(&server), Some(sid()))
        .await
        .unwrap();

    let corrupt = ServerConfiguration {
        host: "https://nas.local".to_string(),
        port: 5001,
        use_https: true,
    };
    let err = client.configure(&corrupt, Some(sid())).await.unwrap_err();
    assert!(matches!(err, DsError::InvalidServerConfiguration(_)));

    // The previous binding still serves requests
    let stats = get_statistics(&client).await.unwrap();
    assert_eq!(stats["speed_download"], 7);
}
