// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Registration and login.
use crate::{error::AppError, models::User, storage::Storage, users::NewUser, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tenantry_common::{ApiResponse, AuthPayload, LoginRequest, RegisterRequest};

pub async fn register<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<AuthPayload>>), AppError> {
    let Json(request) = body?;
    let (user, _) = state
        .users
        .register(NewUser::from(request), &state.organizations)
        .await?;

    let payload = auth_payload(&state, &user)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Registration successful", payload)),
    ))
}

pub async fn login<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AuthPayload>>, AppError> {
    let Json(request) = body?;
    let email = request.email.unwrap_or_default();
    let password = zeroize::Zeroizing::new(request.password.unwrap_or_default());

    let user = state.users.authenticate(&email, &password).await?;

    let payload = auth_payload(&state, &user)?;
    Ok(Json(ApiResponse::success("Login successful", payload)))
}

fn auth_payload<S>(state: &AppState<S>, user: &User) -> Result<AuthPayload, AppError> {
    Ok(AuthPayload {
        access_token: state.tokens.issue(user.id)?,
        user: user.into(),
    })
}
