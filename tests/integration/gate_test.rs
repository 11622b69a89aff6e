//! Auth gate integration tests

use crate::common::*;
use assert_matches::assert_matches;
use dbdesigner::client::gate::{DASHBOARD_ROUTE, LOGIN_ROUTE};
use dbdesigner::client::{AuthGate, GateDecision, GateState, UserStore};
use dbdesigner::shared::error::ApiError;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn login_page() -> String {
    format!("{}/login", LOGIN_URL)
}

async fn mount_me(backend: &TestBackend, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(template)
        .mount(&backend.server)
        .await;
}

#[tokio::test]
async fn test_valid_session_renders_and_fills_store() {
    let backend = TestBackend::start().await;
    mount_me(&backend, ResponseTemplate::new(200).set_body_json(user_json("u1", "a@x.com"))).await;
    let users = UserStore::new();

    let mut gate = AuthGate::new(&backend.client, users.clone());
    assert_eq!(gate.state(), &GateState::Pending);
    assert!(!gate.can_render());

    let decision = gate.enter().await;

    assert_matches!(decision, GateDecision::Render(ref user) if user.id == "u1");
    assert!(gate.can_render());
    assert_eq!(users.current_id().await.as_deref(), Some("u1"));
    assert!(backend.history.is_empty());
}

#[tokio::test]
async fn test_rejected_session_redirects_once() {
    for status in [401, 500] {
        let backend = TestBackend::start().await;
        mount_me(&backend, ResponseTemplate::new(status)).await;
        let users = UserStore::new();

        let mut gate = AuthGate::new(&backend.client, users.clone());
        let decision = gate.enter().await;

        assert_eq!(decision, GateDecision::Redirected(login_page()));
        assert_eq!(gate.state(), &GateState::Denied);
        assert!(!gate.can_render());
        assert_eq!(backend.history.entries(), vec![login_page()], "status {}", status);
        assert!(!users.is_signed_in().await);
    }
}

#[tokio::test]
async fn test_unreachable_backend_redirects() {
    let backend = TestBackend::start_with(|builder| builder.api_url("http://127.0.0.1:9")).await;
    let mut gate = AuthGate::new(&backend.client, UserStore::new());

    gate.enter().await;

    assert_eq!(backend.history.entries(), vec![login_page()]);
}

#[tokio::test]
async fn test_resolve_root_routes_by_session() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u1", "a@x.com")))
        .up_to_n_times(1)
        .mount(&backend.server)
        .await;
    mount_me(&backend, ResponseTemplate::new(401)).await;

    let users = UserStore::new();
    let gate = AuthGate::new(&backend.client, users.clone());

    assert_eq!(gate.resolve_root().await, DASHBOARD_ROUTE);
    assert!(users.is_signed_in().await);
    assert_eq!(gate.resolve_root().await, LOGIN_ROUTE);
    assert_eq!(backend.history.entries(), vec![DASHBOARD_ROUTE, LOGIN_ROUTE]);
}

#[tokio::test]
async fn test_logout_clears_store_and_leaves() {
    let backend = TestBackend::start().await;
    mount_me(&backend, ResponseTemplate::new(200).set_body_json(user_json("u1", "a@x.com"))).await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let users = UserStore::new();
    let mut gate = AuthGate::new(&backend.client, users.clone());
    gate.enter().await;

    gate.logout().await.unwrap();

    assert!(!users.is_signed_in().await);
    assert_eq!(gate.state(), &GateState::Denied);
    assert_eq!(backend.history.entries(), vec![login_page()]);
}

#[tokio::test]
async fn test_failed_logout_keeps_user() {
    let backend = TestBackend::start().await;
    mount_me(&backend, ResponseTemplate::new(200).set_body_json(user_json("u1", "a@x.com"))).await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&backend.server)
        .await;

    let users = UserStore::new();
    let mut gate = AuthGate::new(&backend.client, users.clone());
    gate.enter().await;

    let result = gate.logout().await;

    assert_eq!(result, Err(ApiError::request_failed(500, "boom")));
    assert!(users.is_signed_in().await);
    assert!(gate.can_render());
    assert!(backend.history.is_empty());
}
