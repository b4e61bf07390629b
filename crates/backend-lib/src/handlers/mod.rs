// ============================
// crates/backend-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers.
//!
//! Handlers stay thin: decode the body, call the owning component with the
//! authenticated identity and wrap the result in an [`ApiResponse`] envelope.
//!
//! [`ApiResponse`]: tenantry_common::ApiResponse

pub mod auth;
pub mod organisations;
pub mod users;

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
