// ============================
// crates/backend-lib/src/organizations.rs
// ============================
//! Organization registry.
//!
//! Visibility rule: a caller only ever sees organizations it is a member of.
//! A missing organization and a foreign one are reported the same way.
use crate::{
    error::AppError,
    metrics,
    models::{Organization, OrganizationId, User, UserId},
    storage::Storage,
    validation,
};

#[derive(Debug, Clone)]
pub struct OrganizationRegistry<S> {
    store: S,
}

impl<S: Storage> OrganizationRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The organization every new user starts with. Nothing is stored here;
    /// the user directory persists it together with the user.
    pub fn create_default(&self, user: &User) -> Organization {
        Organization {
            id: OrganizationId::random(),
            name: format!("{}'s Organization", user.first_name),
            description: None,
        }
    }

    pub async fn create(
        &self,
        requester: UserId,
        name: &str,
        description: Option<String>,
    ) -> Result<Organization, AppError> {
        let errors = validation::validate_organization_name(name);
        if !errors.is_empty() {
            return Err(AppError::InvalidInput(errors));
        }

        let organization = Organization {
            id: OrganizationId::random(),
            name: name.trim().to_string(),
            description: description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        };
        self.store
            .insert_organization(organization.clone(), requester)
            .await?;

        tracing::info!(org_id = %organization.id, owner = %requester, "organization created");
        ::metrics::counter!(metrics::ORGANIZATION_CREATED).increment(1);
        Ok(organization)
    }

    pub async fn list_for_user(&self, user: UserId) -> Result<Vec<Organization>, AppError> {
        Ok(self.store.organizations_for_user(user).await?)
    }

    pub async fn get(
        &self,
        org: OrganizationId,
        requester: UserId,
    ) -> Result<Organization, AppError> {
        self.require_membership(org, requester).await?;
        self.store
            .organization_by_id(org)
            .await?
            .ok_or(AppError::NotFoundOrForbidden)
    }

    /// Add `new_user` to `org` on behalf of `requester`, who must already be
    /// a member. Adding an existing member succeeds without a second row.
    pub async fn add_member(
        &self,
        org: OrganizationId,
        new_user: UserId,
        requester: UserId,
    ) -> Result<(), AppError> {
        self.require_membership(org, requester).await?;

        if self.store.add_member(org, new_user).await? {
            tracing::info!(org_id = %org, user_id = %new_user, added_by = %requester, "member added");
            ::metrics::counter!(metrics::MEMBER_ADDED).increment(1);
        } else {
            tracing::debug!(org_id = %org, user_id = %new_user, "already a member");
        }
        Ok(())
    }

    pub async fn members(&self, org: OrganizationId, requester: UserId) -> Result<Vec<User>, AppError> {
        self.require_membership(org, requester).await?;
        Ok(self.store.members_of(org).await?)
    }

    async fn require_membership(&self, org: OrganizationId, user: UserId) -> Result<(), AppError> {
        if self.store.is_member(org, user).await? {
            Ok(())
        } else {
            tracing::debug!(org_id = %org, user_id = %user, "organization hidden from non-member");
            Err(AppError::NotFoundOrForbidden)
        }
    }
}
