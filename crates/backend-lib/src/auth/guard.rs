// ============================
// crates/backend-lib/src/auth/guard.rs
// ============================
//! Request-boundary authentication.
//!
//! Handlers that need an identity take an [`AuthenticatedUser`] argument;
//! the extractor runs [`AccessGuard::authenticate_request`] for that request
//! and nothing is cached between requests.
use super::TokenIssuer;
use crate::{error::AppError, metrics, models::UserId, storage::Storage, AppState};
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use std::sync::Arc;

/// Identity resolved from a verified bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct AccessGuard {
    tokens: Arc<TokenIssuer>,
}

impl AccessGuard {
    pub fn new(tokens: Arc<TokenIssuer>) -> Self {
        Self { tokens }
    }

    /// Every failure (no token, malformed, bad signature, expired) collapses
    /// into [`AppError::Unauthorized`].
    pub fn authenticate_request(&self, token: Option<&str>) -> Result<AuthenticatedUser, AppError> {
        let Some(token) = token else {
            tracing::debug!("request without bearer token");
            ::metrics::counter!(metrics::TOKEN_REJECTED).increment(1);
            return Err(AppError::Unauthorized);
        };

        match self.tokens.verify(token) {
            Ok(user_id) => Ok(AuthenticatedUser { user_id }),
            Err(err) => {
                tracing::warn!(reason = %err, "rejected bearer token");
                ::metrics::counter!(metrics::TOKEN_REJECTED).increment(1);
                Err(AppError::Unauthorized)
            },
        }
    }
}

/// Token from an `Authorization: Bearer <token>` header, if well formed.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty()).then_some(token)
}

impl<S: Storage> FromRequestParts<Arc<AppState<S>>> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<S>>,
    ) -> Result<Self, Self::Rejection> {
        state.guard.authenticate_request(bearer_token(&parts.headers))
    }
}
