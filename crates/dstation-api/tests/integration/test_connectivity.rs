//! Integration tests for the reachability probe

use std::time::Duration;

use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use dstation_api::ProbeConnectivityMonitor;
use dstation_core::domain::ServerConfiguration;
use dstation_core::ports::IConnectivityMonitor;

use crate::common;

#[tokio::test]
async fn test_unbound_monitor_assumes_online() {
    let monitor = ProbeConnectivityMonitor::new().unwrap();
    // No server bound: the first login attempt must not be blocked
    assert!(monitor.is_connected().await);
}

#[tokio::test]
async fn test_reachable_server_probes_true() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let monitor = ProbeConnectivityMonitor::new().unwrap();
    monitor.set_server(common::mock_server_config(&server)).await;
    assert!(monitor.is_connected().await);
}

#[tokio::test]
async fn test_unreachable_server_probes_false() {
    // A configuration pointing at a port nothing listens on
    let dead = ServerConfiguration::new("127.0.0.1".to_string(), 1, false).unwrap();

    let monitor = ProbeConnectivityMonitor::new().unwrap();
    monitor.set_server(dead).await;
    assert!(!monitor.is_connected().await);
}

#[tokio::test]
async fn test_wait_for_connection_returns_once_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let monitor = ProbeConnectivityMonitor::new().unwrap();
    monitor.set_server(common::mock_server_config(&server)).await;
    assert!(monitor.wait_for_connection(Duration::from_secs(2)).await);
}

#[tokio::test]
async fn test_wait_for_connection_gives_up_at_the_deadline() {
    let dead = ServerConfiguration::new("127.0.0.1".to_string(), 1, false).unwrap();

    let monitor = ProbeConnectivityMonitor::new().unwrap();
    monitor.set_server(dead).await;
    assert!(!monitor.wait_for_connection(Duration::from_millis(100)).await);
}
