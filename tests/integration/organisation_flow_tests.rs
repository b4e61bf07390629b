// ============================
// tests/integration/organisation_flow_tests.rs
// ============================
//! Organisation access control and membership over HTTP.
use crate::test_utils::{register, send, test_app};
use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

async fn first_org(app: &axum::Router, token: &str) -> String {
    let (_, body) = send(app, Method::GET, "/api/organisations", Some(token), None).await;
    body["data"]["organisations"][0]["orgId"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_get_own_user_record_only() {
    let app = test_app();
    let (john_token, john_id) = register(&app, "John", "john@example.com").await;
    let (_, jane_id) = register(&app, "Jane", "jane@example.com").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/users/{john_id}"),
        Some(&john_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User retrieved");
    assert_eq!(body["data"]["userId"], john_id.as_str());

    for other in [jane_id, Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/users/{other}"),
            Some(&john_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_create_and_get_organisation() {
    let app = test_app();
    let (token, _) = register(&app, "John", "john@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/organisations",
        Some(&token),
        Some(json!({ "name": "Acme", "description": "Widgets" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Organization created successfully");
    assert_eq!(body["data"]["name"], "Acme");
    let org_id = body["data"]["orgId"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/organisations/{org_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Organization retrieved");
    assert_eq!(body["data"]["description"], "Widgets");

    let (_, body) = send(&app, Method::GET, "/api/organisations", Some(&token), None).await;
    assert_eq!(body["data"]["organisations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_organisation_requires_name() {
    let app = test_app();
    let (token, _) = register(&app, "John", "john@example.com").await;

    for body in [json!({}), json!({ "name": "  ", "description": "x" })] {
        let (status, body) =
            send(&app, Method::POST, "/api/organisations", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Name is required");
    }
}

#[tokio::test]
async fn test_foreign_and_missing_organisations_look_the_same() {
    let app = test_app();
    let (john_token, _) = register(&app, "John", "john@example.com").await;
    let (jane_token, _) = register(&app, "Jane", "jane@example.com").await;
    let johns_org = first_org(&app, &john_token).await;

    let foreign = send(
        &app,
        Method::GET,
        &format!("/api/organisations/{johns_org}"),
        Some(&jane_token),
        None,
    )
    .await;
    let missing = send(
        &app,
        Method::GET,
        &format!("/api/organisations/{}", Uuid::new_v4()),
        Some(&jane_token),
        None,
    )
    .await;

    assert_eq!(foreign.0, StatusCode::NOT_FOUND);
    assert_eq!(foreign, missing);
}

#[tokio::test]
async fn test_add_member_flow() {
    let app = test_app();
    let (john_token, _) = register(&app, "John", "john@example.com").await;
    let (jane_token, jane_id) = register(&app, "Jane", "jane@example.com").await;
    let johns_org = first_org(&app, &john_token).await;
    let uri = format!("/api/organisations/{johns_org}/users");

    // Jane is not a member, so she cannot add herself.
    let (status, _) = send(
        &app,
        Method::POST,
        &uri,
        Some(&jane_token),
        Some(json!({ "userId": jane_id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for _ in 0..2 {
        let (status, body) = send(
            &app,
            Method::POST,
            &uri,
            Some(&john_token),
            Some(json!({ "userId": jane_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User added to organization successfully");
    }

    let (status, body) = send(&app, Method::GET, &uri, Some(&jane_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, Method::GET, "/api/organisations", Some(&jane_token), None).await;
    assert_eq!(body["data"]["organisations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_add_member_input_errors() {
    let app = test_app();
    let (token, _) = register(&app, "John", "john@example.com").await;
    let org = first_org(&app, &token).await;
    let uri = format!("/api/organisations/{org}/users");

    let (status, body) = send(&app, Method::POST, &uri, Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "User ID is required");

    let unknown = Uuid::new_v4().to_string();
    for user_id in [unknown.as_str(), "not-a-uuid"] {
        let (status, _) =
            send(&app, Method::POST, &uri, Some(&token), Some(json!({ "userId": user_id }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
