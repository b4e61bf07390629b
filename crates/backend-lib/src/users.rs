// ============================
// crates/backend-lib/src/users.rs
// ============================
//! User directory: registration, lookups and credential checks.
use crate::{
    auth::CredentialStore,
    error::AppError,
    metrics,
    models::{Organization, User, UserId, UserRecord},
    organizations::OrganizationRegistry,
    storage::Storage,
    validation,
};
use std::sync::Arc;
use tenantry_common::RegisterRequest;
use zeroize::Zeroizing;

/// Registration input
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub phone: Option<String>,
}

impl From<RegisterRequest> for NewUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            first_name: req.first_name.unwrap_or_default(),
            last_name: req.last_name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            password: Zeroizing::new(req.password.unwrap_or_default()),
            phone: req.phone,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserDirectory<S> {
    store: S,
    credentials: Arc<CredentialStore>,
}

impl<S: Storage> UserDirectory<S> {
    pub fn new(store: S, credentials: Arc<CredentialStore>) -> Self {
        Self { store, credentials }
    }

    /// Validate and create a user together with its default organization.
    ///
    /// Fails with [`AppError::Validation`] listing every violated rule; in
    /// that case nothing is written.
    pub async fn register(
        &self,
        input: NewUser,
        organizations: &OrganizationRegistry<S>,
    ) -> Result<(User, Organization), AppError> {
        let mut errors = validation::validate_registration(&input);
        if !validation::is_blank(&input.email) && self.find_by_email(&input.email).await?.is_some() {
            errors.push(validation::duplicate_email());
        }
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "registration rejected");
            return Err(AppError::Validation(errors));
        }

        let credentials = Arc::clone(&self.credentials);
        let password = input.password;
        let password_hash = tokio::task::spawn_blocking(move || credentials.hash(&password)).await??;

        let user = User {
            id: UserId::random(),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        };
        let organization = organizations.create_default(&user);

        // A racing registration on the same email surfaces here as
        // StoreError::EmailTaken, which maps to the duplicate-email entry.
        self.store
            .insert_user_with_organization(
                UserRecord {
                    user: user.clone(),
                    password_hash,
                },
                organization.clone(),
            )
            .await?;

        tracing::info!(user_id = %user.id, org_id = %organization.id, "user registered");
        ::metrics::counter!(metrics::USER_REGISTERED).increment(1);
        Ok((user, organization))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.store.user_by_email(email).await?.map(|record| record.user))
    }

    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(self.store.user_by_id(id).await?.map(|record| record.user))
    }

    /// Check credentials. Unknown email and wrong password fail identically.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let credentials = Arc::clone(&self.credentials);
        let password = Zeroizing::new(password.to_string());

        let Some(record) = self.store.user_by_email(email).await? else {
            tokio::task::spawn_blocking(move || credentials.verify_absent(&password)).await?;
            return Err(login_failed());
        };

        let hash = record.password_hash;
        let matches =
            tokio::task::spawn_blocking(move || credentials.verify(&password, &hash)).await?;
        if !matches {
            return Err(login_failed());
        }

        tracing::info!(user_id = %record.user.id, "login succeeded");
        ::metrics::counter!(metrics::LOGIN_SUCCEEDED).increment(1);
        Ok(record.user)
    }
}

fn login_failed() -> AppError {
    tracing::warn!("login failed");
    ::metrics::counter!(metrics::LOGIN_FAILED).increment(1);
    AppError::AuthenticationFailed
}
