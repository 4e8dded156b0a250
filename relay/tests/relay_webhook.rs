//! Integration tests for the relay webhook endpoint.
//!
//! The router is driven directly with `tower::ServiceExt::oneshot`;
//! the Telegram Bot API is a wiremock server pointed at by the
//! configured API base.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tg_relay::{build_router, AppState, Config, TelegramClient};

const SEND_MESSAGE_PATH: &str = "/bot123:abc/sendMessage";

fn test_state(api_base: &str) -> AppState {
    let config = Config {
        relay_secret_token: "secret".to_string(),
        telegram_bot_token: "123:abc".to_string(),
        subscriber_group_id: "-100987".to_string(),
        port: 0,
        telegram_api_base: api_base.to_string(),
        request_timeout_ms: None,
    };
    let telegram = TelegramClient::new(&config).unwrap();
    AppState::new(config, telegram)
}

async fn post(state: AppState, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = build_router(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn invalid_token_is_rejected_without_forwarding() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post(
        test_state(&server.uri()),
        "/webhook/wrong",
        r#"{"chat_id": 123, "text": "hi"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"detail": "Invalid token"}));
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post(test_state(&server.uri()), "/webhook/secret", "{not json").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({"detail": "Invalid JSON"}));
}

#[tokio::test]
async fn empty_object_short_circuits_without_forwarding() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post(test_state(&server.uri()), "/webhook/secret", "{}").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"detail": "Empty payload received, no action taken."})
    );
}

#[tokio::test]
async fn empty_body_behaves_like_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post(test_state(&server.uri()), "/webhook/secret", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"detail": "Empty payload received, no action taken."})
    );
}

#[tokio::test]
async fn missing_required_field_is_a_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post(
        test_state(&server.uri()),
        "/webhook/secret",
        r#"{"chat_id": 5}"#,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({"detail": "Invalid payload"}));
}

#[tokio::test]
async fn valid_payload_is_forwarded_and_response_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post(
        test_state(&server.uri()),
        "/webhook/secret",
        r#"{"chat_id": 123, "text": "hi"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));

    // Outbound body carries exactly the required fields, optional
    // fields are absent, not null
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent, json!({"chat_id": 123, "text": "hi"}));
}

#[tokio::test]
async fn optional_fields_are_forwarded_when_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = json!({
        "chat_id": 123,
        "text": "hi",
        "parse_mode": "HTML",
        "reply_markup": {
            "inline_keyboard": [[{"text": "Open", "url": "https://example.com"}]]
        }
    });

    let (status, _) = post(
        test_state(&server.uri()),
        "/webhook/secret",
        &payload.to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let requests = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent, payload);
}

#[tokio::test]
async fn upstream_error_response_passes_through_verbatim() {
    let server = MockServer::start().await;
    let error_body = json!({
        "ok": false,
        "error_code": 400,
        "description": "Bad Request: chat not found"
    });
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post(
        test_state(&server.uri()),
        "/webhook/secret",
        r#"{"chat_id": 999, "text": "hi"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error_body);
}

#[tokio::test]
async fn repeated_requests_forward_independently() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_MESSAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(2)
        .mount(&server)
        .await;

    let state = test_state(&server.uri());
    let payload = r#"{"chat_id": 123, "text": "hi"}"#;

    let (first, _) = post(state.clone(), "/webhook/secret", payload).await;
    let (second, _) = post(state, "/webhook/secret", payload).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, requests[1].body);
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let server = MockServer::start().await;
    let response = build_router(test_state(&server.uri()))
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}
