//! Session client integration tests
//!
//! Error mapping, redirect-on-401 and cookie handling of the request helper.

use crate::assert_err;
use crate::common::*;
use dbdesigner::client::RequestOptions;
use dbdesigner::shared::error::{ApiError, GENERIC_FAILURE_MESSAGE};
use pretty_assertions::assert_eq;
use reqwest::Method;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_success_decodes_json() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u1", "a@x.com")))
        .mount(&backend.server)
        .await;

    let body: Value = backend.client.get("/auth/me").await.unwrap();
    assert_eq!(body["id"], "u1");
    assert!(backend.history.is_empty());
}

#[tokio::test]
async fn test_unauthorized_redirects_once_to_login_app() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/dbdesigner/diagrams"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Unauthorized"})))
        .mount(&backend.server)
        .await;

    let result: Result<Value, ApiError> = backend.client.get("/dbdesigner/diagrams").await;

    assert_eq!(result, Err(ApiError::NotAuthenticated));
    assert_eq!(backend.history.entries(), vec![LOGIN_URL.to_string()]);
}

#[tokio::test]
async fn test_unauthorized_without_redirect() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&backend.server)
        .await;

    let result: Result<Value, ApiError> = backend
        .client
        .request(Method::GET, "/auth/me", None, RequestOptions::no_redirect())
        .await;

    assert_err!(result, ApiError::NotAuthenticated);
    assert!(backend.history.is_empty());
}

#[tokio::test]
async fn test_failure_uses_server_error_message() {
    let backend = TestBackend::start().await;
    Mock::given(method("DELETE"))
        .and(path("/dbdesigner/diagrams/d1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Owner only"})))
        .mount(&backend.server)
        .await;

    let result: Result<Value, ApiError> = backend.client.delete("/dbdesigner/diagrams/d1").await;

    assert_eq!(result, Err(ApiError::request_failed(403, "Owner only")));
    assert!(backend.history.is_empty());
}

#[tokio::test]
async fn test_failure_without_readable_message_is_generic() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/numeric"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({"error": 42})))
        .mount(&backend.server)
        .await;

    let plain: Result<Value, ApiError> = backend.client.get("/plain").await;
    let numeric: Result<Value, ApiError> = backend.client.get("/numeric").await;

    assert_eq!(plain, Err(ApiError::request_failed(500, GENERIC_FAILURE_MESSAGE)));
    assert_eq!(numeric.unwrap_err().status(), Some(502));
}

#[tokio::test]
async fn test_json_body_is_sent_with_content_type() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Orders", "data": {"tables": []}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let body: Value = backend
        .client
        .post("/echo", &json!({"name": "Orders", "data": {"tables": []}}))
        .await
        .unwrap();
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn test_empty_success_body_decodes_as_null() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&backend.server)
        .await;

    let body: Option<Value> = backend.client.post("/auth/logout", &json!({})).await.unwrap();
    assert!(body.is_none());
}

#[tokio::test]
async fn test_malformed_success_body_is_invalid_response() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&backend.server)
        .await;

    let result: Result<dbdesigner::shared::models::User, ApiError> =
        backend.client.get("/auth/me").await;
    assert_err!(result, ApiError::InvalidResponse { .. });
}

#[tokio::test]
async fn test_session_cookie_is_replayed() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sid=abc123; Path=/; HttpOnly")
                .set_body_json(json!({"success": true})),
        )
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("cookie", "sid=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u1", "a@x.com")))
        .expect(1)
        .mount(&backend.server)
        .await;

    let _: Value = backend
        .client
        .post("/auth/login", &json!({"email": "a@x.com", "password": "secret"}))
        .await
        .unwrap();
    let me: Value = backend.client.get("/auth/me").await.unwrap();
    assert_eq!(me["email"], "a@x.com");
}

#[tokio::test]
async fn test_unreachable_backend_does_not_redirect() {
    let backend = TestBackend::start_with(|builder| builder.api_url("http://127.0.0.1:9")).await;

    let result: Result<Value, ApiError> = backend.client.get("/auth/me").await;

    assert_eq!(result, Err(ApiError::ServiceUnavailable));
    assert!(backend.history.is_empty());
}
