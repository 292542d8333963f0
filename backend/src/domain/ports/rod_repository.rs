//! Driven port for rod persistence.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::{Identity, ListRequest, Rod, RodDraft, RodPatch, RodSort};

/// Storage of rods scoped to the calling identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RodRepository: Send + Sync {
    /// One page of the caller's rods.
    async fn list(
        &self,
        identity: &Identity,
        request: &ListRequest<RodSort>,
    ) -> Result<Page<Rod>, RepositoryError>;

    /// A non-deleted rod owned by the caller.
    async fn find(&self, identity: &Identity, id: Uuid) -> Result<Option<Rod>, RepositoryError>;

    /// Persist a new rod.
    async fn insert(&self, identity: &Identity, draft: &RodDraft) -> Result<Rod, RepositoryError>;

    /// Apply `patch` to a non-deleted rod, returning the updated row.
    async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &RodPatch,
    ) -> Result<Option<Rod>, RepositoryError>;

    /// Mark a rod deleted. Returns `false` when no visible rod matched.
    async fn soft_delete(&self, identity: &Identity, id: Uuid) -> Result<bool, RepositoryError>;
}
