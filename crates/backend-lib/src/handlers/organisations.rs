// ============================
// crates/backend-lib/src/handlers/organisations.rs
// ============================
//! Organisation routes. Every one of them requires a bearer token.
use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{OrganizationId, UserId},
    storage::Storage,
    validation, AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tenantry_common::{
    AddMemberRequest, ApiResponse, CreateOrganisationRequest, MemberList, OrganisationList,
    OrganisationView, UserView,
};

fn org_id(raw: &str) -> Result<OrganizationId, AppError> {
    OrganizationId::parse(raw).ok_or(AppError::NotFoundOrForbidden)
}

pub async fn list<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    identity: AuthenticatedUser,
) -> Result<Json<ApiResponse<OrganisationList>>, AppError> {
    let organisations = state
        .organizations
        .list_for_user(identity.user_id)
        .await?
        .iter()
        .map(OrganisationView::from)
        .collect();

    Ok(Json(ApiResponse::success(
        "Organisations retrieved",
        OrganisationList { organisations },
    )))
}

pub async fn get<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    identity: AuthenticatedUser,
    Path(org): Path<String>,
) -> Result<Json<ApiResponse<OrganisationView>>, AppError> {
    let organisation = state
        .organizations
        .get(org_id(&org)?, identity.user_id)
        .await?;
    Ok(Json(ApiResponse::success(
        "Organization retrieved",
        OrganisationView::from(&organisation),
    )))
}

pub async fn create<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    identity: AuthenticatedUser,
    body: Result<Json<CreateOrganisationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<OrganisationView>>), AppError> {
    let Json(request) = body?;
    let name = validation::required("name", request.name.as_deref(), validation::NAME_REQUIRED)
        .map_err(|e| AppError::InvalidInput(vec![e]))?;

    let organisation = state
        .organizations
        .create(identity.user_id, name, request.description)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Organization created successfully",
            OrganisationView::from(&organisation),
        )),
    ))
}

pub async fn add_member<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    identity: AuthenticatedUser,
    Path(org): Path<String>,
    body: Result<Json<AddMemberRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let Json(request) = body?;
    let raw_user = validation::required(
        "userId",
        request.user_id.as_deref(),
        validation::USER_ID_REQUIRED,
    )
    .map_err(|e| AppError::InvalidInput(vec![e]))?;

    let org = org_id(&org)?;
    let new_user = UserId::parse(raw_user).ok_or(AppError::NotFoundOrForbidden)?;
    state
        .organizations
        .add_member(org, new_user, identity.user_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "User added to organization successfully",
        Value::Null,
    )))
}

pub async fn members<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    identity: AuthenticatedUser,
    Path(org): Path<String>,
) -> Result<Json<ApiResponse<MemberList>>, AppError> {
    let users = state
        .organizations
        .members(org_id(&org)?, identity.user_id)
        .await?
        .iter()
        .map(UserView::from)
        .collect();

    Ok(Json(ApiResponse::success(
        "Members retrieved",
        MemberList { users },
    )))
}
