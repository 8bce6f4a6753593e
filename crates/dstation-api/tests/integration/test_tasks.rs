//! Integration tests for download task operations

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use dstation_core::domain::{CreateTaskRequest, DsError, TaskId, TaskStatus};
use dstation_core::ports::IStationGateway;

use crate::common;

const TASK_PATH: &str = "/webapi/DownloadStation/task.cgi";

#[tokio::test]
async fn test_list_tasks_decodes_transfer_details() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path(TASK_PATH))
        .and(query_param("api", "SYNO.DownloadStation.Task"))
        .and(query_param("method", "list"))
        .and(query_param("additional", "detail,transfer"))
        .and(query_param("_sid", common::TEST_SID))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::ok_envelope(serde_json::json!({
                "tasks": [{
                    "id": "dbid_1",
                    "title": "debian-12.iso",
                    "status": "downloading",
                    "size": 4_000_000u64,
                    "username": "admin",
                    "additional": {
                        "detail": {"destination": "downloads", "create_time": 1_700_000_000},
                        "transfer": {"size_downloaded": 1_000_000u64, "speed_download": 2048}
                    }
                }]
            }))),
        )
        .mount(&server)
        .await;

    let tasks = gateway.list_tasks().await.unwrap();
    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];
    assert_eq!(task.id.as_str(), "dbid_1");
    assert_eq!(task.status, TaskStatus::Downloading);
    assert_eq!(task.size_downloaded, 1_000_000);
    assert_eq!(task.speed_download, 2048);
    assert_eq!(task.destination.as_deref(), Some("downloads"));
}

#[tokio::test]
async fn test_list_tasks_session_expiry_surfaces_as_domain_error() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path(TASK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::err_envelope(105)))
        .mount(&server)
        .await;

    assert_eq!(gateway.list_tasks().await.unwrap_err(), DsError::SessionExpired);
}

#[tokio::test]
async fn test_create_task_from_uri_forwards_destination() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path(TASK_PATH))
        .and(query_param("method", "create"))
        .and(query_param("uri", "magnet:?xt=urn:btih:abc"))
        .and(query_param("destination", "downloads/iso"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::ok_empty_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let request =
        CreateTaskRequest::from_uri("magnet:?xt=urn:btih:abc").with_destination("downloads/iso");
    gateway.create_task(&request).await.unwrap();
}

#[tokio::test]
async fn test_create_task_from_pre_escaped_uri_is_not_double_encoded() {
    let (server, gateway) = common::setup_gateway().await;

    // wiremock matches against the decoded query value: if the client
    // double-encoded, the server would see the escaped form instead
    Mock::given(method("GET"))
        .and(path(TASK_PATH))
        .and(query_param("uri", "magnet:?xt=urn:btih:abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::ok_empty_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateTaskRequest::from_uri("magnet%3A%3Fxt%3Durn%3Abtih%3Aabc");
    gateway.create_task(&request).await.unwrap();
}

#[tokio::test]
async fn test_pause_joins_ids_with_commas() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path(TASK_PATH))
        .and(query_param("method", "pause"))
        .and(query_param("id", "dbid_1,dbid_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::ok_empty_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let ids = vec![
        TaskId::new("dbid_1".to_string()).unwrap(),
        TaskId::new("dbid_2".to_string()).unwrap(),
    ];
    gateway.pause_tasks(&ids).await.unwrap();
}

#[tokio::test]
async fn test_edit_destination_uses_edit_method() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path(TASK_PATH))
        .and(query_param("method", "edit"))
        .and(query_param("version", "2"))
        .and(query_param("destination", "archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::ok_empty_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let ids = vec![TaskId::new("dbid_9".to_string()).unwrap()];
    gateway.edit_task_destination(&ids, "archive").await.unwrap();
}

#[tokio::test]
async fn test_statistics_getinfo() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path("/webapi/DownloadStation/statistic.cgi"))
        .and(query_param("api", "SYNO.DownloadStation.Statistic"))
        .and(query_param("method", "getinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::ok_envelope(
            serde_json::json!({"speed_download": 123_000, "speed_upload": 4_500}),
        )))
        .mount(&server)
        .await;

    let stats = gateway.statistics().await.unwrap();
    assert_eq!(stats.speed_download, 123_000);
    assert_eq!(stats.speed_upload, 4_500);
}

#[tokio::test]
async fn test_data_returning_call_with_missing_data_is_invalid_response() {
    let (server, gateway) = common::setup_gateway().await;

    Mock::given(method("GET"))
        .and(path("/webapi/DownloadStation/statistic.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::ok_empty_envelope()))
        .mount(&server)
        .await;

    assert_eq!(gateway.statistics().await.unwrap_err(), DsError::InvalidResponse);
}
