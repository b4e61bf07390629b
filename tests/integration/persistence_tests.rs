// ============================
// tests/integration/persistence_tests.rs
// ============================
//! The flat-file store keeps accounts across restarts.
use crate::test_utils::{register, send, test_settings};
use axum::http::{Method, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use tenantry_backend::{routes, storage::FlatFileStore, AppState};

async fn app_over(dir: &TempDir) -> axum::Router {
    let store = FlatFileStore::open(dir.path()).await.unwrap();
    let state = AppState::new(store, test_settings()).unwrap();
    routes::create_router(Arc::new(state))
}

#[tokio::test]
async fn test_accounts_survive_restart() {
    let dir = TempDir::new().unwrap();

    let first = app_over(&dir).await;
    register(&first, "John", "john@example.com").await;
    drop(first);

    let second = app_over(&dir).await;
    let (status, body) = send(
        &second,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "john@example.com", "password": "password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let token = body["data"]["accessToken"].as_str().unwrap();
    let (_, body) = send(&second, Method::GET, "/api/organisations", Some(token), None).await;
    assert_eq!(body["data"]["organisations"][0]["name"], "John's Organization");
}
