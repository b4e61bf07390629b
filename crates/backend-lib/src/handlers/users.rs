// ============================
// crates/backend-lib/src/handlers/users.rs
// ============================
use crate::{
    auth::AuthenticatedUser, error::AppError, models::UserId, storage::Storage, AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tenantry_common::{ApiResponse, UserView};

/// A caller may only read its own record; any other id is reported as not
/// found.
pub async fn get_user<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    identity: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserView>>, AppError> {
    let requested = UserId::parse(&id).ok_or(AppError::NotFoundOrForbidden)?;
    if requested != identity.user_id {
        return Err(AppError::NotFoundOrForbidden);
    }

    let user = state
        .users
        .find_by_id(requested)
        .await?
        .ok_or(AppError::NotFoundOrForbidden)?;
    Ok(Json(ApiResponse::success("User retrieved", UserView::from(&user))))
}
