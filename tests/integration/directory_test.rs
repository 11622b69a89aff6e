//! Diagram directory integration tests

use crate::assert_err;
use crate::common::*;
use dbdesigner::client::{can_manage, DiagramDirectory, DiagramEntry, DirectoryStatus};
use dbdesigner::shared::error::ApiError;
use dbdesigner::shared::models::Permission;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

const DIAGRAMS: &str = "/dbdesigner/diagrams";

fn listing() -> serde_json::Value {
    json!({
        "owned": [
            diagram_json("d1", "u1", "Orders"),
            diagram_json("d2", "u1", "Billing")
        ],
        "shared": [shared_diagram_json("d3", "u9", "Inventory", "editor")]
    })
}

async fn loaded_directory(backend: &TestBackend) -> DiagramDirectory {
    Mock::given(method("GET"))
        .and(path(DIAGRAMS))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .mount(&backend.server)
        .await;
    let mut directory = DiagramDirectory::new(backend.client.clone(), backend.notices.clone());
    directory.load().await.unwrap();
    directory
}

#[tokio::test]
async fn test_load_partitions_and_normalizes() {
    let backend = TestBackend::start().await;
    let directory = loaded_directory(&backend).await;

    assert_eq!(directory.status(), DirectoryStatus::Ready);
    assert_eq!(directory.owned().len(), 2);
    assert_eq!(directory.shared().len(), 1);
    assert_eq!(directory.shared()[0].permission, Permission::Edit);
    assert_eq!(directory.shared()[0].id(), "d3");

    let shared = directory.find("d3").unwrap();
    assert!(matches!(shared, DiagramEntry::Shared(_)));
    assert_eq!(shared.owner_label(), "Owner Name");
    assert_eq!(directory.find("d1").unwrap().owner_label(), "You");
    assert!(directory.find("missing").is_none());
}

#[tokio::test]
async fn test_only_owner_can_manage() {
    let backend = TestBackend::start().await;
    let directory = loaded_directory(&backend).await;

    assert!(can_manage(&directory.owned()[0], Some("u1")));
    assert!(!can_manage(&directory.shared()[0].diagram, Some("u1")));
    assert!(!can_manage(&directory.owned()[0], None));
}

#[tokio::test]
async fn test_load_failure_empties_lists() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path(DIAGRAMS))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .up_to_n_times(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path(DIAGRAMS))
        .respond_with(ResponseTemplate::new(500))
        .mount(&backend.server)
        .await;

    let mut directory = DiagramDirectory::new(backend.client.clone(), backend.notices.clone());
    directory.load().await.unwrap();
    assert_eq!(directory.owned().len(), 2);

    assert_err!(directory.load().await, ApiError::RequestFailed { status: 500, .. });
    assert_eq!(directory.status(), DirectoryStatus::LoadFailed);
    assert!(directory.owned().is_empty());
    assert!(directory.shared().is_empty());
}

#[tokio::test]
async fn test_blank_name_issues_no_request() {
    let backend = TestBackend::start().await;
    let mut directory = DiagramDirectory::new(backend.client.clone(), backend.notices.clone());

    let result = directory.create("   ", json!({})).await;

    assert_err!(result, ApiError::Validation(_));
    assert_eq!(backend.request_count().await, 0);
    assert!(backend.notices.is_empty());
}

#[tokio::test]
async fn test_create_sends_trimmed_name() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path(DIAGRAMS))
        .and(body_json(json!({"name": "Orders", "data": {"tables": []}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(diagram_json("d7", "u1", "Orders")))
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut directory = DiagramDirectory::new(backend.client.clone(), backend.notices.clone());
    let created = directory.create("  Orders ", json!({"tables": []})).await.unwrap();

    assert_eq!(created.id, "d7");
}

#[tokio::test]
async fn test_create_failure_notifies() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path(DIAGRAMS))
        .respond_with(ResponseTemplate::new(500))
        .mount(&backend.server)
        .await;

    let mut directory = DiagramDirectory::new(backend.client.clone(), backend.notices.clone());
    assert!(directory.create("Orders", json!({})).await.is_err());

    let notices = backend.notices.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "Failed to create diagram. Try again.");
}

#[tokio::test]
async fn test_get_and_save() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/dbdesigner/diagrams/d1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(diagram_json("d1", "u1", "Orders")))
        .mount(&backend.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/dbdesigner/diagrams/d1"))
        .and(body_json(json!({"name": "Orders v2", "data": {"tables": ["users"]}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(diagram_json("d1", "u1", "Orders v2")))
        .expect(1)
        .mount(&backend.server)
        .await;

    let directory = DiagramDirectory::new(backend.client.clone(), backend.notices.clone());
    let fetched = directory.get("d1").await.unwrap();
    assert_eq!(fetched.name, "Orders");

    let saved = directory
        .save("d1", "Orders v2", &json!({"tables": ["users"]}))
        .await
        .unwrap();
    assert_eq!(saved.name, "Orders v2");
}

#[tokio::test]
async fn test_delete_removes_only_on_success() {
    let backend = TestBackend::start().await;
    let mut directory = loaded_directory(&backend).await;
    Mock::given(method("DELETE"))
        .and(path("/dbdesigner/diagrams/d1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/dbdesigner/diagrams/d2"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Owner only"})))
        .mount(&backend.server)
        .await;

    directory.delete("d1").await.unwrap();
    assert_eq!(directory.owned().len(), 1);
    assert_eq!(directory.owned()[0].id, "d2");

    assert!(directory.delete("d2").await.is_err());
    assert_eq!(directory.owned().len(), 1);
    assert_eq!(directory.shared().len(), 1);

    let notices = backend.notices.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "Failed to delete diagram. Try again.");
}

#[tokio::test]
async fn test_bare_prefix_uses_root_diagrams_path() {
    let backend = TestBackend::start_with(|builder| builder.api_prefix("")).await;
    Mock::given(method("GET"))
        .and(path("/diagrams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"owned": [], "shared": []})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut directory = DiagramDirectory::new(backend.client.clone(), backend.notices.clone());
    directory.load().await.unwrap();

    assert_eq!(directory.status(), DirectoryStatus::Ready);
    assert!(directory.owned().is_empty());
}
