// ================
// common/src/lib.rs
// ================
//! Wire types shared between the Tenantry server and its clients.
//! Every body on the HTTP surface is JSON with camelCase field names.

use serde::{Deserialize, Serialize};

/// Success envelope wrapping every 2xx body
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiResponse<T> {
    /// Always `"success"`
    pub status: String,
    /// Human readable summary
    pub message: String,
    /// Payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap `data` in a success envelope
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }
}

/// Body of `POST /auth/register`
///
/// Every field is optional on the wire; absent and `null` values are
/// reported by the server as "required" field errors rather than as
/// malformed JSON.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Body of `POST /auth/login`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Body of `POST /api/organisations`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganisationRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /api/organisations/{orgId}/users`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Public projection of a user; never carries credentials
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Public projection of an organization
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationView {
    pub org_id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Returned by register and login
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    /// Bearer token for subsequent requests
    pub access_token: String,
    pub user: UserView,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrganisationList {
    pub organisations: Vec<OrganisationView>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MemberList {
    pub users: Vec<UserView>,
}

/// One violated validation rule
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Machine readable part of an error body
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Body of every non-2xx response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorBody {
    /// Always `"error"`
    pub status: String,
    pub error: ErrorDetail,
    /// Field errors, present only for validation failures
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}
