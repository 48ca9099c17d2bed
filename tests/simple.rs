use crate::common::{slot_outputter, DebugWriter};
use httpmock::MockServer;
use patient_api::{ApiClient, ClientConfig, PatientApp, RequestError};
use serde_json::json;
use std::time::Duration;

mod common;

#[tokio::test]
async fn insert_patients() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/api/insert-multiple")
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "patients": [
                        {"patientName": "Sara Brown", "birthDate": "1901-01-01"},
                        {"patientName": "John Smith", "birthDate": "1941-01-01"},
                        {"patientName": "Jack Ma", "birthDate": "1961-01-30"},
                        {"patientName": "Elon Musk", "birthDate": "1999-01-01"}
                    ]
                }));
            then.status(200).json_body(json!({"message": "Inserted 4 rows"}));
        })
        .await;

    let writer = &mut DebugWriter(String::new());
    let mut outputter = slot_outputter(writer);
    let api = ApiClient::new(server.base_url(), ClientConfig::default()).unwrap();
    let mut app = PatientApp::new(api, &mut outputter);

    let outcome = app.insert_patients().await.unwrap();

    assert!(outcome.is_ok());
    mock.assert_async().await;
    let DebugWriter(buf) = writer;
    assert_eq!("insert-response: Inserted 4 rows\n", buf.as_str());
}

#[tokio::test]
async fn post_single_patient() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/api/insert-multiple")
                .json_body(json!({
                    "patients": [{"patientName": "Sara Brown", "birthDate": "1901-01-01"}]
                }));
            then.status(200).json_body(json!({"message": "Inserted 1 row"}));
        })
        .await;

    let api = ApiClient::new(server.base_url(), ClientConfig::default()).unwrap();
    let outcome = api
        .post(
            "/api/insert-multiple",
            &json!({"patients": [{"patientName": "Sara Brown", "birthDate": "1901-01-01"}]}),
        )
        .await;

    assert_eq!(Ok(json!({"message": "Inserted 1 row"})), outcome);
}

#[tokio::test]
async fn select_query() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/api/query")
                .query_param("sql", "SELECT * FROM patients");
            then.status(200)
                .json_body(json!([{"birthdate": "1901-01-01", "name": "Sara Brown"}]));
        })
        .await;

    let writer = &mut DebugWriter(String::new());
    let mut outputter = slot_outputter(writer);
    let api = ApiClient::new(server.base_url(), ClientConfig::default()).unwrap();
    let mut app = PatientApp::new(api, &mut outputter);

    let outcome = app.submit_query("SELECT * FROM patients").await.unwrap();

    assert!(outcome.is_ok());

    mock.assert_async().await;
    let DebugWriter(buf) = writer;
    assert_eq!(
        "query-response: Response: [{\"birthdate\":\"1901-01-01\",\"name\":\"Sara Brown\"}]\n",
        buf.as_str()
    );
}

#[tokio::test]
async fn insert_query_with_error_field() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/api/query")
                .json_body(json!({"sql": "INSERT INTO patients VALUES (1)"}));
            then.status(200)
                .json_body(json!({"error": "column count doesn't match"}));
        })
        .await;

    let writer = &mut DebugWriter(String::new());
    let mut outputter = slot_outputter(writer);
    let api = ApiClient::new(server.base_url(), ClientConfig::default()).unwrap();
    let mut app = PatientApp::new(api, &mut outputter);

    let outcome = app
        .submit_query("INSERT INTO patients VALUES (1)")
        .await
        .unwrap();

    assert!(outcome.is_err());

    let DebugWriter(buf) = writer;
    assert_eq!(
        "query-response: Error: column count doesn't match\n",
        buf.as_str()
    );
}

#[tokio::test]
async fn server_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET).path("/api/query");
            then.status(500);
        })
        .await;

    let api = ApiClient::new(server.base_url(), ClientConfig::default()).unwrap();
    let error = api
        .get("/api/query?sql=SELECT%20*%20FROM%20patients")
        .await
        .unwrap_err();

    assert_eq!(RequestError::Status(500), error);
    assert_eq!(json!({"message": "Error: Server Error: 500"}), error.to_json());
}

#[tokio::test]
async fn rejected_query_sends_nothing() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.path("/api/query");
            then.status(200).json_body(json!({}));
        })
        .await;

    let writer = &mut DebugWriter(String::new());
    let mut outputter = slot_outputter(writer);
    let api = ApiClient::new(server.base_url(), ClientConfig::default()).unwrap();
    let mut app = PatientApp::new(api, &mut outputter);

    let outcome = app.submit_query("DELETE FROM patients").await.unwrap();

    assert!(outcome.is_err());

    mock.assert_hits_async(0).await;
    let DebugWriter(buf) = writer;
    assert_eq!(
        "query-response: Error: Only INSERT or SELECT queries are allowed.\n",
        buf.as_str()
    );
}

#[tokio::test]
async fn connection_refused() {
    let api = ApiClient::new("http://127.0.0.1:1", ClientConfig::default()).unwrap();

    let outcome = api.get("/api/query?sql=SELECT%201").await;

    assert!(matches!(outcome, Err(RequestError::Transport(_))));
}

#[tokio::test]
async fn timeout_is_a_transport_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET).path("/api/query");
            then.status(200)
                .json_body(json!({}))
                .delay(Duration::from_secs(2));
        })
        .await;

    let config = ClientConfig::new(true, Some(Duration::from_millis(100)));
    let api = ApiClient::new(server.base_url(), config).unwrap();

    let outcome = api.get("/api/query").await;

    assert!(matches!(outcome, Err(RequestError::Transport(_))));
}
