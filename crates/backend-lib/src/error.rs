// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use crate::{auth::CredentialError, auth::TokenError, storage::StoreError, validation};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tenantry_common::{ErrorBody, ErrorDetail, FieldError};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    /// Accumulated field errors on registration (422)
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    /// Missing or blank required field outside registration (400)
    #[error("Invalid input: {0:?}")]
    InvalidInput(Vec<FieldError>),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Bad credentials; deliberately says nothing about which part was wrong
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Missing, invalid or expired bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Resource absent or caller not allowed to see it
    #[error("Not found or access denied")]
    NotFoundOrForbidden,

    #[error("Storage error: {0}")]
    Storage(StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidInput(_) | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationFailed | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFoundOrForbidden => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VAL_001",
            AppError::InvalidInput(_) => "VAL_002",
            AppError::MalformedBody(_) => "REQ_001",
            AppError::AuthenticationFailed => "AUTH_001",
            AppError::Unauthorized => "AUTH_002",
            AppError::NotFoundOrForbidden => "NF_001",
            AppError::Storage(_) => "STORE_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a message that is safe to show to the caller
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::InvalidInput(errors) => errors
                .first()
                .map_or_else(|| "Invalid input provided".to_string(), |e| e.message.clone()),
            AppError::MalformedBody(_) => "Invalid request format".to_string(),
            AppError::AuthenticationFailed => "Authentication failed".to_string(),
            AppError::Unauthorized => "Missing or invalid bearer token".to_string(),
            AppError::NotFoundOrForbidden => "Resource not found or access denied".to_string(),
            AppError::Storage(_) | AppError::Internal(_) => {
                "An internal server error occurred".to_string()
            },
        }
    }

    /// Field errors carried by this error, if any
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppError::Validation(errors) | AppError::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            status: "error".to_string(),
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.sanitized_message(),
            },
            errors: self.field_errors().to_vec(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailTaken => AppError::Validation(vec![validation::duplicate_email()]),
            StoreError::UnknownUser(_) | StoreError::UnknownOrganization(_) => {
                AppError::NotFoundOrForbidden
            },
            other => AppError::Storage(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(reason) => AppError::Internal(reason),
            _ => AppError::Unauthorized,
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("background task failed: {err}"))
    }
}
