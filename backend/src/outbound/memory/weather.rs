//! Weather snapshot table.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use super::MemoryStore;
use crate::domain::ports::{RepositoryError, WeatherSnapshotRepository};
use crate::domain::{
    Identity, Keyed, ListRequest, WeatherSnapshot, WeatherSnapshotDraft, WeatherSort, apply_keyset,
};

#[async_trait]
impl WeatherSnapshotRepository for MemoryStore {
    async fn list(
        &self,
        identity: &Identity,
        trip_id: Uuid,
        request: &ListRequest<WeatherSort>,
    ) -> Result<Page<WeatherSnapshot>, RepositoryError> {
        let user_id = identity.user_id();
        let search = request.search.as_deref().map(str::to_lowercase);
        let rows: Vec<WeatherSnapshot> = self
            .read()?
            .snapshots
            .iter()
            .filter(|snapshot| snapshot.trip_id == trip_id && snapshot.user_id == user_id)
            .filter(|snapshot| {
                search.as_deref().is_none_or(|term| {
                    snapshot.source.contains(term)
                        || snapshot
                            .observation
                            .description
                            .as_deref()
                            .is_some_and(|text| text.to_lowercase().contains(term))
                })
            })
            .cloned()
            .collect();
        let rows = apply_keyset(rows, request);
        Ok(Page::from_lookahead(rows, request.limit, |snapshot| {
            snapshot.cursor(request.sort)
        }))
    }

    async fn insert(
        &self,
        identity: &Identity,
        trip_id: Uuid,
        draft: &WeatherSnapshotDraft,
    ) -> Result<WeatherSnapshot, RepositoryError> {
        let user_id = identity.user_id();
        let now = self.now();
        let mut tables = self.write()?;
        let trip_ok = tables
            .trips
            .iter()
            .any(|trip| trip.id == trip_id && trip.user_id == user_id);
        if !trip_ok {
            return Err(RepositoryError::invalid_reference(format!("trip {trip_id}")));
        }
        let snapshot = WeatherSnapshot {
            id: Uuid::new_v4(),
            user_id,
            trip_id,
            source: draft.source.clone(),
            observation: draft.observation.clone(),
            created_at: now,
        };
        tables.snapshots.push(snapshot.clone());
        Ok(snapshot)
    }

    async fn delete(&self, identity: &Identity, id: Uuid) -> Result<bool, RepositoryError> {
        let user_id = identity.user_id();
        let mut tables = self.write()?;
        let before = tables.snapshots.len();
        tables
            .snapshots
            .retain(|snapshot| !(snapshot.id == id && snapshot.user_id == user_id));
        Ok(tables.snapshots.len() != before)
    }
}
