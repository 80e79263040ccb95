//! Integration tests for fog-connection using mockito

use fog_connection::{Connection, ConnectionOptions, Error, Method, RequestParams};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestPayload {
    name: String,
    value: i32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestResponse {
    success: bool,
    data: String,
}

fn connection(server: &mockito::Server, options: ConnectionOptions) -> Connection {
    Connection::new(&server.url(), false, options).expect("Connection should build")
}

// === Connection::request tests ===

#[tokio::test]
async fn test_request_sends_user_agent() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/")
        .match_header("user-agent", fog_connection::user_agent().as_str())
        .with_status(200)
        .create_async()
        .await;

    let connection = connection(&server, ConnectionOptions::default());
    let response = connection
        .request(RequestParams::get("/"))
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), 200);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_user_agent_cannot_be_overridden() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/")
        .match_header("user-agent", fog_connection::user_agent().as_str())
        .with_status(200)
        .create_async()
        .await;

    let connection = connection(&server, ConnectionOptions::default());
    let response = connection
        .request(RequestParams::get("/").header("User-Agent", "evil/1.0"))
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), 200);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_response_keeps_repeated_headers() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/cookies")
        .with_status(200)
        .with_header("set-cookie", "a=1")
        .with_header("set-cookie", "b=2")
        .create_async()
        .await;

    let connection = connection(&server, ConnectionOptions::default());
    let response = connection
        .request(RequestParams::get("cookies"))
        .await
        .expect("Request should succeed");

    assert_eq!(response.header_all("Set-Cookie"), ["a=1", "b=2"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_with_base_path() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/foo/bar")
        .with_status(200)
        .with_body("joined")
        .expect(2)
        .create_async()
        .await;

    let connection = connection(&server, ConnectionOptions::default().base_path("foo"));

    for path in ["bar", "/bar"] {
        let response = connection
            .request(RequestParams::get(path))
            .await
            .expect("Request should succeed");
        assert_eq!(response.text().expect("UTF-8 body"), "joined");
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_with_default_path() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/bar")
        .with_status(204)
        .create_async()
        .await;

    let connection = connection(&server, ConnectionOptions::default().path("bar"));
    let response = connection
        .request(RequestParams::default())
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), 204);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_query_and_headers() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/search")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("q".into(), "fog".into()),
            mockito::Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .match_header("x-default", "yes")
        .match_header("x-request", "1")
        .with_status(200)
        .create_async()
        .await;

    let connection = connection(
        &server,
        ConnectionOptions::default().header("X-Default", "yes"),
    );
    let params = RequestParams::get("search")
        .query("q", "fog")
        .query("page", "2")
        .header("X-Request", "1");
    connection
        .request(params)
        .await
        .expect("Request should succeed");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_post_json() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/submit")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "name": "test",
            "value": 42
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": "received"}"#)
        .create_async()
        .await;

    let connection = connection(&server, ConnectionOptions::default().base_path("api"));
    let payload = TestPayload {
        name: "test".to_string(),
        value: 42,
    };
    let params = RequestParams::post("submit")
        .json(&payload)
        .expect("Payload should serialize");
    let response: TestResponse = connection
        .request_json(params)
        .await
        .expect("POST should succeed");

    assert!(response.success);
    assert_eq!(response.data, "received");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_returns_error_statuses_unchanged() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("DELETE", "/missing")
        .with_status(404)
        .with_body("Not Found")
        .create_async()
        .await;

    let connection = connection(&server, ConnectionOptions::default());
    let response = connection
        .request(RequestParams::new(Method::Delete, "missing"))
        .await
        .expect("Request without expects should not fail");

    assert!(response.is_client_error());
    assert_eq!(response.status(), 404);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_expects_with_debug_response() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/fail")
        .with_status(500)
        .with_body("Internal Server Error: disk full")
        .create_async()
        .await;

    let connection = connection(&server, ConnectionOptions::default());
    let result = connection
        .request(RequestParams::get("fail").expects([200]))
        .await;

    if let Err(Error::Status { status, message }) = result {
        assert_eq!(status, 500);
        assert_eq!(message, "Internal Server Error: disk full");
    } else {
        panic!("Expected Error::Status");
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_expects_without_debug_response() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/fail")
        .with_status(503)
        .with_body("secret details")
        .create_async()
        .await;

    let connection = connection(&server, ConnectionOptions::default().debug_response(false));
    let result = connection
        .request(RequestParams::get("fail").expects([200]))
        .await;

    if let Err(Error::Status { status, message }) = result {
        assert_eq!(status, 503);
        assert_eq!(message, "Service Unavailable");
    } else {
        panic!("Expected Error::Status");
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_json_error_status() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/error")
        .with_status(400)
        .with_body("Bad Request")
        .create_async()
        .await;

    let connection = connection(&server, ConnectionOptions::default());
    let result: Result<TestResponse, _> = connection
        .request_json(RequestParams::get("api/error"))
        .await;

    if let Err(Error::Status { status, message }) = result {
        assert_eq!(status, 400);
        assert_eq!(message, "Bad Request");
    } else {
        panic!("Expected Error::Status");
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_json_invalid_body() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/data")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let connection = connection(&server, ConnectionOptions::default());
    let result: Result<TestResponse, _> = connection
        .request_json(RequestParams::get("/api/data"))
        .await;

    assert!(matches!(result, Err(Error::Serialization(_))));
    mock.assert_async().await;
}

// === Connection::reset tests ===

#[tokio::test]
async fn test_reset_keeps_configuration() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/foo/bar")
        .match_header("user-agent", fog_connection::user_agent().as_str())
        .with_status(200)
        .expect(2)
        .create_async()
        .await;

    let mut connection = Connection::new(
        &server.url(),
        true,
        ConnectionOptions::default().base_path("foo"),
    )
    .expect("Connection should build");

    connection
        .request(RequestParams::get("bar"))
        .await
        .expect("Request should succeed");
    connection.reset().expect("Reset should succeed");
    connection
        .request(RequestParams::get("bar"))
        .await
        .expect("Request after reset should succeed");

    assert!(connection.is_persistent());
    mock.assert_async().await;
}

// === Transport error tests ===

#[tokio::test]
async fn test_connection_refused() {
    // Nothing listens on port 9 of localhost in the test environment.
    let connection = Connection::new(
        "http://127.0.0.1:9",
        false,
        ConnectionOptions::default().connect_timeout_secs(2),
    )
    .expect("Connection should build");

    let result = connection.request(RequestParams::get("/")).await;
    assert!(matches!(
        result,
        Err(Error::Connection(_)) | Err(Error::Timeout)
    ));
}
