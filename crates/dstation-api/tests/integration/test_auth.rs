//! Integration tests for the login handshake and logout

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use dstation_core::domain::{Credentials, DsError};
use dstation_core::ports::IStationGateway;

use crate::common;

fn credentials(otp: Option<&str>) -> Credentials {
    Credentials::new("admin", "secret", otp.map(String::from)).unwrap()
}

#[tokio::test]
async fn test_login_returns_session_token() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path("/webapi/auth.cgi"))
        .and(query_param("api", "SYNO.API.Auth"))
        .and(query_param("method", "login"))
        .and(query_param("account", "admin"))
        .and(query_param("passwd", "secret"))
        .and(query_param("format", "sid"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::ok_envelope(serde_json::json!({"sid": "fresh-sid"}))),
        )
        .mount(&server)
        .await;

    let config = common::mock_server_config(&server);
    let sid = gateway.login(&config, &credentials(None)).await.unwrap();
    assert_eq!(sid.as_str(), "fresh-sid");
}

#[tokio::test]
async fn test_login_sends_otp_code_when_present() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path("/webapi/auth.cgi"))
        .and(query_param("otp_code", "123456"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::ok_envelope(serde_json::json!({"sid": "otp-sid"}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = common::mock_server_config(&server);
    let sid = gateway
        .login(&config, &credentials(Some("123456")))
        .await
        .unwrap();
    assert_eq!(sid.as_str(), "otp-sid");
}

#[tokio::test]
async fn test_login_auth_codes_map_to_invalid_credentials() {
    for code in [400, 401, 402] {
        let (server, gateway) = common::setup_gateway().await;

        Mock::given(method("GET"))
            .and(path("/webapi/auth.cgi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(common::err_envelope(code)))
            .mount(&server)
            .await;

        let config = common::mock_server_config(&server);
        let result = gateway.login(&config, &credentials(None)).await;
        assert_eq!(result.unwrap_err(), DsError::InvalidCredentials);
    }
}

#[tokio::test]
async fn test_login_otp_codes_keep_their_meaning() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path("/webapi/auth.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::err_envelope(403)))
        .mount(&server)
        .await;

    let config = common::mock_server_config(&server);
    let result = gateway.login(&config, &credentials(None)).await;
    assert_eq!(result.unwrap_err(), DsError::OtpRequired);
}

#[tokio::test]
async fn test_logout_attaches_session_token() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path("/webapi/auth.cgi"))
        .and(query_param("method", "logout"))
        .and(query_param("_sid", common::TEST_SID))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::ok_empty_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    gateway.logout().await.unwrap();
}
