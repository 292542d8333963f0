//! Trip use-cases.

use std::sync::Arc;

use pagination::Page;
use uuid::Uuid;

use super::ports::TripRepository;
use super::storage_errors::{map_repository_error, not_found};
use super::trips::{ENDED_BEFORE_STARTED, window_is_valid};
use super::{Error, Identity, ListRequest, Trip, TripDraft, TripPatch, TripSort};

const ENTITY: &str = "trip";

fn map_error(err: super::ports::RepositoryError) -> Error {
    map_repository_error(ENTITY, err)
}

/// Trip operations on behalf of the calling angler.
#[derive(Clone)]
pub struct TripService {
    trips: Arc<dyn TripRepository>,
}

impl TripService {
    /// Create the service over a trip repository.
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    /// One page of the caller's trips.
    pub async fn list(
        &self,
        identity: &Identity,
        request: &ListRequest<TripSort>,
    ) -> Result<Page<Trip>, Error> {
        self.trips.list(identity, request).await.map_err(map_error)
    }

    /// A single trip.
    pub async fn get(&self, identity: &Identity, id: Uuid) -> Result<Trip, Error> {
        self.trips
            .find(identity, id)
            .await
            .map_err(map_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    /// Record a new trip.
    pub async fn create(&self, identity: &Identity, draft: &TripDraft) -> Result<Trip, Error> {
        if !window_is_valid(draft.started_at, draft.ended_at) {
            return Err(Error::invalid_field("ended_at", ENDED_BEFORE_STARTED));
        }
        self.trips.insert(identity, draft).await.map_err(map_error)
    }

    /// Change fields of a trip.
    ///
    /// When the patch moves only one end of the window the other end is
    /// read from the stored trip before the window rule is checked.
    pub async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &TripPatch,
    ) -> Result<Trip, Error> {
        if patch.touches_one_window_end() {
            let current = self.get(identity, id).await?;
            let (started_at, ended_at) = patch.merged_window(&current);
            if !window_is_valid(started_at, ended_at) {
                return Err(Error::invalid_field("ended_at", ENDED_BEFORE_STARTED));
            }
        } else if let (Some(started_at), Some(ended_at)) = (patch.started_at, patch.ended_at) {
            if !window_is_valid(started_at, ended_at) {
                return Err(Error::invalid_field("ended_at", ENDED_BEFORE_STARTED));
            }
        }
        self.trips
            .update(identity, id, patch)
            .await
            .map_err(map_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    /// Soft-delete a trip.
    pub async fn delete(&self, identity: &Identity, id: Uuid) -> Result<(), Error> {
        if self.trips.soft_delete(identity, id).await.map_err(map_error)? {
            Ok(())
        } else {
            Err(not_found(ENTITY, id))
        }
    }
}
