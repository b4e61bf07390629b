// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core library for the tenantry identity and organization service.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod organizations;
pub mod routes;
pub mod storage;
pub mod users;
pub mod validation;

use crate::auth::{AccessGuard, CredentialError, CredentialStore, TokenIssuer};
use crate::config::{Settings, SettingsError};
use crate::organizations::OrganizationRegistry;
use crate::storage::Storage;
use crate::users::UserDirectory;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Failure while assembling [`AppState`]
#[derive(Error, Debug)]
pub enum StateError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Credentials(#[from] CredentialError),
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// Registration, lookups and logins
    pub users: UserDirectory<S>,
    /// Organizations and membership
    pub organizations: OrganizationRegistry<S>,
    /// Token signing for register and login responses
    pub tokens: Arc<TokenIssuer>,
    /// Bearer token checks on protected routes
    pub guard: AccessGuard,
    /// Validated settings
    pub settings: Arc<Settings>,
}

impl<S: Storage> AppState<S> {
    /// Wire every component around one store handle.
    pub fn new(storage: S, settings: Settings) -> Result<Self, StateError> {
        settings.validate()?;

        let credentials = Arc::new(CredentialStore::new(&settings.auth.hashing)?);
        let tokens = Arc::new(TokenIssuer::new(
            settings.auth.jwt_secret.as_bytes(),
            Duration::from_secs(settings.auth.token_ttl_secs),
        ));

        Ok(Self {
            users: UserDirectory::new(storage.clone(), credentials),
            organizations: OrganizationRegistry::new(storage),
            guard: AccessGuard::new(Arc::clone(&tokens)),
            tokens,
            settings: Arc::new(settings),
        })
    }
}
