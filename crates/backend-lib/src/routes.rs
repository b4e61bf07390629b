// ============================
// crates/backend-lib/src/routes.rs
// ============================
//! HTTP router.
use crate::handlers::{self, auth, organisations, users};
use crate::storage::Storage;
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the full router over `state`
pub fn create_router<S: Storage>(state: Arc<AppState<S>>) -> Router {
    let api = Router::new()
        .route("/users/{id}", get(users::get_user::<S>))
        .route(
            "/organisations",
            get(organisations::list::<S>).post(organisations::create::<S>),
        )
        .route("/organisations/{org_id}", get(organisations::get::<S>))
        .route(
            "/organisations/{org_id}/users",
            get(organisations::members::<S>).post(organisations::add_member::<S>),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/register", post(auth::register::<S>))
        .route("/auth/login", post(auth::login::<S>))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
