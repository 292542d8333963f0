//! Driven port for trip persistence.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::{Identity, ListRequest, Trip, TripDraft, TripPatch, TripSort};

/// Storage of trips scoped to the calling identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// One page of the caller's trips.
    async fn list(
        &self,
        identity: &Identity,
        request: &ListRequest<TripSort>,
    ) -> Result<Page<Trip>, RepositoryError>;

    /// A non-deleted trip owned by the caller.
    async fn find(&self, identity: &Identity, id: Uuid) -> Result<Option<Trip>, RepositoryError>;

    /// Persist a new trip.
    async fn insert(&self, identity: &Identity, draft: &TripDraft)
    -> Result<Trip, RepositoryError>;

    /// Apply `patch` to a non-deleted trip, returning the updated row.
    async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &TripPatch,
    ) -> Result<Option<Trip>, RepositoryError>;

    /// Mark a trip deleted. Returns `false` when no visible trip matched.
    async fn soft_delete(&self, identity: &Identity, id: Uuid) -> Result<bool, RepositoryError>;
}
