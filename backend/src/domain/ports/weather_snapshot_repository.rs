//! Driven port for weather snapshot persistence.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::{Identity, ListRequest, WeatherSnapshot, WeatherSnapshotDraft, WeatherSort};

/// Storage of weather snapshots scoped to the calling identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSnapshotRepository: Send + Sync {
    /// One page of snapshots recorded for `trip_id`.
    async fn list(
        &self,
        identity: &Identity,
        trip_id: Uuid,
        request: &ListRequest<WeatherSort>,
    ) -> Result<Page<WeatherSnapshot>, RepositoryError>;

    /// Persist a snapshot on `trip_id`.
    async fn insert(
        &self,
        identity: &Identity,
        trip_id: Uuid,
        draft: &WeatherSnapshotDraft,
    ) -> Result<WeatherSnapshot, RepositoryError>;

    /// Remove a snapshot. Returns `false` when no visible snapshot matched.
    async fn delete(&self, identity: &Identity, id: Uuid) -> Result<bool, RepositoryError>;
}
