//! Trip table.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use super::{MemoryStore, Tables, search_matches};
use crate::domain::ports::{RepositoryError, TripRepository};
use crate::domain::{
    Identity, Keyed, ListRequest, Trip, TripDraft, TripPatch, TripSort, UserId, apply_keyset,
};

fn visible_trip(tables: &mut Tables, user_id: UserId, id: Uuid) -> Option<&mut Trip> {
    tables
        .trips
        .iter_mut()
        .find(|trip| trip.id == id && trip.user_id == user_id && trip.deleted_at.is_none())
}

#[async_trait]
impl TripRepository for MemoryStore {
    async fn list(
        &self,
        identity: &Identity,
        request: &ListRequest<TripSort>,
    ) -> Result<Page<Trip>, RepositoryError> {
        let user_id = identity.user_id();
        let rows: Vec<Trip> = self
            .read()?
            .trips
            .iter()
            .filter(|trip| trip.user_id == user_id)
            .filter(|trip| request.include_deleted || trip.deleted_at.is_none())
            .filter(|trip| search_matches(request.search.as_deref(), |term| trip.matches(term)))
            .cloned()
            .collect();
        let rows = apply_keyset(rows, request);
        Ok(Page::from_lookahead(rows, request.limit, |trip| {
            trip.cursor(request.sort)
        }))
    }

    async fn find(&self, identity: &Identity, id: Uuid) -> Result<Option<Trip>, RepositoryError> {
        let user_id = identity.user_id();
        Ok(self
            .read()?
            .trips
            .iter()
            .find(|trip| trip.id == id && trip.user_id == user_id && trip.deleted_at.is_none())
            .cloned())
    }

    async fn insert(
        &self,
        identity: &Identity,
        draft: &TripDraft,
    ) -> Result<Trip, RepositoryError> {
        let now = self.now();
        let trip = Trip {
            id: Uuid::new_v4(),
            user_id: identity.user_id(),
            title: draft.title.clone(),
            location_name: draft.location_name.clone(),
            latitude: draft.latitude,
            longitude: draft.longitude,
            started_at: draft.started_at,
            ended_at: draft.ended_at,
            notes: draft.notes.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.write()?.trips.push(trip.clone());
        Ok(trip)
    }

    async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &TripPatch,
    ) -> Result<Option<Trip>, RepositoryError> {
        let now = self.now();
        let mut tables = self.write()?;
        Ok(visible_trip(&mut tables, identity.user_id(), id).map(|trip| {
            patch.apply_to(trip);
            trip.updated_at = now;
            trip.clone()
        }))
    }

    async fn soft_delete(&self, identity: &Identity, id: Uuid) -> Result<bool, RepositoryError> {
        let now = self.now();
        let mut tables = self.write()?;
        Ok(visible_trip(&mut tables, identity.user_id(), id)
            .map(|trip| {
                trip.deleted_at = Some(now);
                trip.updated_at = now;
            })
            .is_some())
    }
}
