//! Shared test helpers for web API integration tests
//!
//! Provides wiremock-based mock server setup. Each helper returns a
//! configured [`StationGateway`] pointing at the mock server, already
//! carrying a session token.

use std::sync::Arc;

use wiremock::MockServer;

use dstation_api::transport::ReqwestTransport;
use dstation_api::StationGateway;
use dstation_core::domain::{ServerConfiguration, SessionId};
use dstation_core::ports::IStationGateway;

/// Session token the helpers bind to the gateway
pub const TEST_SID: &str = "test-sid";

/// Server configuration pointing at the mock server
pub fn mock_server_config(server: &MockServer) -> ServerConfiguration {
    let address = server.address();
    ServerConfiguration::new(address.ip().to_string(), address.port(), false)
        .expect("mock server address is a valid configuration")
}

/// Starts a mock server and a gateway bound to it with [`TEST_SID`]
pub async fn setup_gateway() -> (MockServer, StationGateway) {
    let server = MockServer::start().await;
    let gateway = StationGateway::new(Arc::new(
        ReqwestTransport::with_default_timeouts().expect("transport builds"),
    ));
    let config = mock_server_config(&server);
    gateway
        .configure(&config, Some(SessionId::new(TEST_SID.to_string()).unwrap()))
        .await
        .expect("mock server binding is valid");
    (server, gateway)
}

/// A successful envelope with the given data payload
pub fn ok_envelope(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({"data": data, "success": true})
}

/// A successful envelope with no data member
pub fn ok_empty_envelope() -> serde_json::Value {
    serde_json::json!({"success": true})
}

/// A failed envelope carrying the given API error code
pub fn err_envelope(code: i32) -> serde_json::Value {
    serde_json::json!({"success": false, "error": {"code": code}})
}
