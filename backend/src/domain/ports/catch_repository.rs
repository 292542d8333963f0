//! Driven port for catch persistence.

use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::{Catch, CatchDraft, CatchPatch, Identity};

/// Storage of catches scoped to the calling identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatchRepository: Send + Sync {
    /// Every catch of a trip, ordered by `caught_at` then `id`.
    async fn list_for_trip(
        &self,
        identity: &Identity,
        trip_id: Uuid,
    ) -> Result<Vec<Catch>, RepositoryError>;

    /// Persist a new catch on `trip_id`.
    async fn insert(
        &self,
        identity: &Identity,
        trip_id: Uuid,
        draft: &CatchDraft,
    ) -> Result<Catch, RepositoryError>;

    /// Apply `patch` to a catch, returning the updated row.
    async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &CatchPatch,
    ) -> Result<Option<Catch>, RepositoryError>;

    /// Remove a catch. Returns `false` when no visible catch matched.
    async fn delete(&self, identity: &Identity, id: Uuid) -> Result<bool, RepositoryError>;
}
