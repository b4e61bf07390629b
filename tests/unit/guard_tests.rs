// =============
// tests/unit/guard_tests.rs
// =============
//! Bearer token handling on protected routes.
use crate::test_utils::{register, send, test_app, test_state, TEST_SECRET};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use std::time::Duration;
use tenantry_backend::{auth::TokenIssuer, models::UserId, routes};
use tower::ServiceExt;

const PROTECTED: &str = "/api/organisations";

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = test_app();
    let (status, _) = send(&app, Method::GET, PROTECTED, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_scheme_is_unauthorized() {
    let app = test_app();
    let (token, _) = register(&app, "John", "john@example.com").await;

    let request = Request::builder()
        .uri(PROTECTED)
        .header(header::AUTHORIZATION, format!("Basic {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bad_tokens_get_identical_responses() {
    let app = test_app();
    let user = UserId::random();

    let foreign = TokenIssuer::new(b"some-other-secret-some-other-secret", Duration::from_secs(900))
        .issue(user)
        .unwrap();
    let expired = TokenIssuer::new(TEST_SECRET.as_bytes(), Duration::from_secs(60))
        .issue_at(user, chrono::Utc::now() - chrono::Duration::minutes(5))
        .unwrap();

    let mut bodies = Vec::new();
    for token in ["not-a-jwt", foreign.as_str(), expired.as_str()] {
        let (status, body) = send(&app, Method::GET, PROTECTED, Some(token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "token {token:?}");
        bodies.push(body);
    }
    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_token_from_state_issuer_is_accepted() {
    let state = test_state();
    let app = routes::create_router(state.clone());
    let (_, user_id) = register(&app, "John", "john@example.com").await;

    let user = UserId::parse(&user_id).unwrap();
    let token = state.tokens.issue(user).unwrap();

    let (status, body) = send(&app, Method::GET, PROTECTED, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["organisations"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
