//! Catch use-cases.
//!
//! Catches hang off a trip. Every operation first confirms that the trip,
//! and any rod being linked, is visible to the caller so a foreign or
//! deleted parent reads as "not found" rather than leaking existence.

use std::sync::Arc;

use uuid::Uuid;

use super::ports::{CatchRepository, RepositoryError, RodRepository, TripRepository};
use super::storage_errors::{map_repository_error, not_found};
use super::{Catch, CatchDraft, CatchPatch, Error, Identity};

const ENTITY: &str = "catch";
/// Reason attached to `rod_id` when the rod is not one of the caller's.
pub const UNKNOWN_ROD: &str = "must reference one of your rods";

fn map_error(err: RepositoryError) -> Error {
    map_repository_error(ENTITY, err)
}

/// Catch operations on behalf of the calling angler.
#[derive(Clone)]
pub struct CatchService {
    trips: Arc<dyn TripRepository>,
    rods: Arc<dyn RodRepository>,
    catches: Arc<dyn CatchRepository>,
}

impl CatchService {
    /// Create the service over the trip, rod and catch repositories.
    pub fn new(
        trips: Arc<dyn TripRepository>,
        rods: Arc<dyn RodRepository>,
        catches: Arc<dyn CatchRepository>,
    ) -> Self {
        Self {
            trips,
            rods,
            catches,
        }
    }

    async fn ensure_trip(&self, identity: &Identity, trip_id: Uuid) -> Result<(), Error> {
        match self.trips.find(identity, trip_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(not_found("trip", trip_id)),
            Err(err) => Err(map_repository_error("trip", err)),
        }
    }

    async fn ensure_rod(&self, identity: &Identity, rod_id: Uuid) -> Result<(), Error> {
        match self.rods.find(identity, rod_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(Error::invalid_field("rod_id", UNKNOWN_ROD)),
            Err(err) => Err(map_repository_error("rod", err)),
        }
    }

    /// Every catch of a trip, ordered by `caught_at` then `id`.
    pub async fn list_for_trip(
        &self,
        identity: &Identity,
        trip_id: Uuid,
    ) -> Result<Vec<Catch>, Error> {
        self.ensure_trip(identity, trip_id).await?;
        self.catches
            .list_for_trip(identity, trip_id)
            .await
            .map_err(map_error)
    }

    /// Record a catch on a trip.
    pub async fn create(
        &self,
        identity: &Identity,
        trip_id: Uuid,
        draft: &CatchDraft,
    ) -> Result<Catch, Error> {
        self.ensure_trip(identity, trip_id).await?;
        if let Some(rod_id) = draft.rod_id {
            self.ensure_rod(identity, rod_id).await?;
        }
        self.catches
            .insert(identity, trip_id, draft)
            .await
            .map_err(map_error)
    }

    /// Change fields of a catch.
    pub async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &CatchPatch,
    ) -> Result<Catch, Error> {
        if let Some(rod_id) = patch.linked_rod() {
            self.ensure_rod(identity, rod_id).await?;
        }
        self.catches
            .update(identity, id, patch)
            .await
            .map_err(map_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    /// Remove a catch.
    pub async fn delete(&self, identity: &Identity, id: Uuid) -> Result<(), Error> {
        if self.catches.delete(identity, id).await.map_err(map_error)? {
            Ok(())
        } else {
            Err(not_found(ENTITY, id))
        }
    }
}
