// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Storage ports with a flat-file implementation.
//!
//! The ports are split by concern (users, organizations, memberships). Every
//! method that writes more than one row is a single atomic unit: the
//! flat-file store applies it to a copy of its tables under the write lock,
//! persists the copy with write-then-rename, and only then publishes it.
use crate::models::{email_key, Organization, OrganizationId, User, UserId, UserRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;
use tokio::{fs as tokio_fs, sync::RwLock};

/// Name of the snapshot file inside the storage directory
pub const SNAPSHOT_FILE: &str = "store.json";

/// Storage-level failures.
///
/// `EmailTaken`, `UnknownUser` and `UnknownOrganization` are constraint
/// violations detected inside an atomic unit; the rest are faults.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("email already registered")]
    EmailTaken,

    #[error("user {0} does not exist")]
    UnknownUser(UserId),

    #[error("organization {0} does not exist")]
    UnknownOrganization(OrganizationId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// User records keyed by id, unique on [`email_key`].
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user, its default organization and the owner membership as
    /// one unit. Fails with [`StoreError::EmailTaken`] without writing
    /// anything when the email is already registered.
    async fn insert_user_with_organization(
        &self,
        user: UserRecord,
        organization: Organization,
    ) -> Result<(), StoreError>;

    async fn user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError>;

    async fn user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;
}

#[async_trait]
pub trait OrganizationStore: Send + Sync {
    /// Insert an organization with `owner` as its only member, as one unit.
    async fn insert_organization(
        &self,
        organization: Organization,
        owner: UserId,
    ) -> Result<(), StoreError>;

    async fn organization_by_id(
        &self,
        id: OrganizationId,
    ) -> Result<Option<Organization>, StoreError>;
}

/// The explicit user/organization join relation.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Add a membership. Returns `false` when the pair already existed.
    async fn add_member(&self, org: OrganizationId, user: UserId) -> Result<bool, StoreError>;

    /// Remove a membership. Returns `false` when there was nothing to remove.
    async fn remove_member(&self, org: OrganizationId, user: UserId) -> Result<bool, StoreError>;

    async fn is_member(&self, org: OrganizationId, user: UserId) -> Result<bool, StoreError>;

    /// Organizations `user` belongs to, ordered by organization id.
    async fn organizations_for_user(&self, user: UserId)
        -> Result<Vec<Organization>, StoreError>;

    /// Members of `org`, ordered by user id.
    async fn members_of(&self, org: OrganizationId) -> Result<Vec<User>, StoreError>;
}

/// Everything the services need from a store handle.
pub trait Storage: UserStore + OrganizationStore + MembershipStore + Clone + 'static {}

impl<T> Storage for T where T: UserStore + OrganizationStore + MembershipStore + Clone + 'static {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Membership {
    user_id: UserId,
    org_id: OrganizationId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Tables {
    users: BTreeMap<UserId, UserRecord>,
    organizations: BTreeMap<OrganizationId, Organization>,
    memberships: BTreeSet<Membership>,
    /// email key -> user id; rebuilt on load
    #[serde(skip)]
    emails: HashMap<String, UserId>,
}

impl Tables {
    fn reindex(&mut self) {
        self.emails = self
            .users
            .values()
            .map(|record| (email_key(&record.user.email), record.user.id))
            .collect();
    }

    fn require_user(&self, id: UserId) -> Result<(), StoreError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::UnknownUser(id))
        }
    }

    fn require_organization(&self, id: OrganizationId) -> Result<(), StoreError> {
        if self.organizations.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::UnknownOrganization(id))
        }
    }
}

/// Flat-file implementation of the storage ports
///
/// State lives in memory and, unless the store was created with
/// [`FlatFileStore::in_memory`], is snapshotted to `<root>/store.json` after
/// every committed unit.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    tables: Arc<RwLock<Tables>>,
    snapshot: Option<PathBuf>,
}

impl FlatFileStore {
    /// Open (or create) a store rooted at `root`.
    pub async fn open<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        tokio_fs::create_dir_all(&root).await?;

        let path = root.join(SNAPSHOT_FILE);
        let mut tables = if tokio_fs::try_exists(&path).await? {
            let content = tokio_fs::read(&path).await?;
            serde_json::from_slice::<Tables>(&content)?
        } else {
            Tables::default()
        };
        tables.reindex();

        tracing::info!(
            path = %path.display(),
            users = tables.users.len(),
            organizations = tables.organizations.len(),
            "opened flat-file store"
        );

        Ok(Self {
            tables: Arc::new(RwLock::new(tables)),
            snapshot: Some(path),
        })
    }

    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            snapshot: None,
        }
    }

    /// Run `apply` as one atomic unit.
    ///
    /// `apply` works on a copy; the copy replaces the live tables only after
    /// it returned `Ok` and the snapshot (if any) was written.
    async fn commit<T, F>(&self, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Tables) -> Result<T, StoreError> + Send,
        T: Send,
    {
        let mut live = self.tables.write().await;
        let mut next = live.clone();
        let outcome = apply(&mut next)?;

        if let Some(path) = &self.snapshot {
            persist(path, &next).await?;
        }

        *live = next;
        Ok(outcome)
    }
}

async fn persist(path: &Path, tables: &Tables) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(tables)?;
    let tmp = path.with_extension("json.tmp");
    tokio_fs::write(&tmp, json).await?;
    tokio_fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl UserStore for FlatFileStore {
    async fn insert_user_with_organization(
        &self,
        user: UserRecord,
        organization: Organization,
    ) -> Result<(), StoreError> {
        self.commit(move |tables| {
            let key = email_key(&user.user.email);
            if tables.emails.contains_key(&key) {
                return Err(StoreError::EmailTaken);
            }

            let membership = Membership {
                user_id: user.user.id,
                org_id: organization.id,
            };
            tables.emails.insert(key, user.user.id);
            tables.users.insert(user.user.id, user);
            tables.organizations.insert(organization.id, organization);
            tables.memberships.insert(membership);
            Ok(())
        })
        .await
    }

    async fn user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .emails
            .get(&email_key(email))
            .and_then(|id| tables.users.get(id))
            .cloned())
    }
}

#[async_trait]
impl OrganizationStore for FlatFileStore {
    async fn insert_organization(
        &self,
        organization: Organization,
        owner: UserId,
    ) -> Result<(), StoreError> {
        self.commit(move |tables| {
            tables.require_user(owner)?;
            tables.memberships.insert(Membership {
                user_id: owner,
                org_id: organization.id,
            });
            tables.organizations.insert(organization.id, organization);
            Ok(())
        })
        .await
    }

    async fn organization_by_id(
        &self,
        id: OrganizationId,
    ) -> Result<Option<Organization>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.organizations.get(&id).cloned())
    }
}

#[async_trait]
impl MembershipStore for FlatFileStore {
    async fn add_member(&self, org: OrganizationId, user: UserId) -> Result<bool, StoreError> {
        {
            let tables = self.tables.read().await;
            tables.require_organization(org)?;
            tables.require_user(user)?;
            if tables.memberships.contains(&Membership { user_id: user, org_id: org }) {
                return Ok(false);
            }
        }

        // Re-checked under the write lock; a racing add may have won.
        self.commit(move |tables| {
            tables.require_organization(org)?;
            tables.require_user(user)?;
            Ok(tables.memberships.insert(Membership { user_id: user, org_id: org }))
        })
        .await
    }

    async fn remove_member(&self, org: OrganizationId, user: UserId) -> Result<bool, StoreError> {
        self.commit(move |tables| {
            Ok(tables.memberships.remove(&Membership { user_id: user, org_id: org }))
        })
        .await
    }

    async fn is_member(&self, org: OrganizationId, user: UserId) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.memberships.contains(&Membership { user_id: user, org_id: org }))
    }

    async fn organizations_for_user(
        &self,
        user: UserId,
    ) -> Result<Vec<Organization>, StoreError> {
        let tables = self.tables.read().await;
        // The set is ordered by (user, org), so this yields org id order.
        Ok(tables
            .memberships
            .iter()
            .filter(|m| m.user_id == user)
            .filter_map(|m| tables.organizations.get(&m.org_id).cloned())
            .collect())
    }

    async fn members_of(&self, org: OrganizationId) -> Result<Vec<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .iter()
            .filter(|m| m.org_id == org)
            .filter_map(|m| tables.users.get(&m.user_id))
            .map(|record| record.user.clone())
            .collect())
    }
}
