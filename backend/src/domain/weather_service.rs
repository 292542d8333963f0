//! Weather snapshot use-cases, including provider refresh with cooldown.

use std::sync::Arc;

use chrono::TimeDelta;
use mockable::Clock;
use pagination::{Page, PageLimit, SortOrder};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use super::ports::{
    RepositoryError, TripRepository, WeatherSnapshotRepository, WeatherSource, WeatherSourceError,
};
use super::storage_errors::{map_repository_error, not_found};
use super::{
    Error, Identity, ListRequest, Trip, WeatherObservation, WeatherSnapshot, WeatherSnapshotDraft,
    WeatherSort,
};

const ENTITY: &str = "weather snapshot";

/// Minimum time between two snapshots of the same trip before a refresh
/// may call the provider again.
pub const REFRESH_COOLDOWN_SECONDS: i64 = 600;

fn map_error(err: RepositoryError) -> Error {
    map_repository_error(ENTITY, err)
}

fn map_source_error(err: WeatherSourceError) -> Error {
    match err {
        WeatherSourceError::RateLimited { message } => {
            warn!(%message, "weather provider quota exhausted");
            Error::rate_limited("weather provider rate limit reached; try again later")
        }
        other => {
            warn!(error = %other, "weather provider call failed");
            Error::bad_gateway("weather provider unavailable")
        }
    }
}

/// Weather operations on behalf of the calling angler.
#[derive(Clone)]
pub struct WeatherService {
    trips: Arc<dyn TripRepository>,
    snapshots: Arc<dyn WeatherSnapshotRepository>,
    source: Arc<dyn WeatherSource>,
    clock: Arc<dyn Clock>,
}

impl WeatherService {
    /// Create the service over its repositories, provider and clock.
    pub fn new(
        trips: Arc<dyn TripRepository>,
        snapshots: Arc<dyn WeatherSnapshotRepository>,
        source: Arc<dyn WeatherSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            trips,
            snapshots,
            source,
            clock,
        }
    }

    async fn visible_trip(&self, identity: &Identity, trip_id: Uuid) -> Result<Trip, Error> {
        self.trips
            .find(identity, trip_id)
            .await
            .map_err(|err| map_repository_error("trip", err))?
            .ok_or_else(|| not_found("trip", trip_id))
    }

    /// One page of snapshots recorded for a trip.
    pub async fn list(
        &self,
        identity: &Identity,
        trip_id: Uuid,
        request: &ListRequest<WeatherSort>,
    ) -> Result<Page<WeatherSnapshot>, Error> {
        self.visible_trip(identity, trip_id).await?;
        self.snapshots
            .list(identity, trip_id, request)
            .await
            .map_err(map_error)
    }

    /// Record an observation entered by hand.
    pub async fn create(
        &self,
        identity: &Identity,
        trip_id: Uuid,
        observation: WeatherObservation,
    ) -> Result<WeatherSnapshot, Error> {
        self.visible_trip(identity, trip_id).await?;
        self.snapshots
            .insert(identity, trip_id, &WeatherSnapshotDraft::manual(observation))
            .await
            .map_err(map_error)
    }

    /// Remove a snapshot.
    pub async fn delete(&self, identity: &Identity, id: Uuid) -> Result<(), Error> {
        if self.snapshots.delete(identity, id).await.map_err(map_error)? {
            Ok(())
        } else {
            Err(not_found(ENTITY, id))
        }
    }

    /// Fetch current conditions at the trip's coordinates and store them.
    ///
    /// # Errors
    /// - `not_found` when the trip is not visible.
    /// - `validation_error` when the trip has no coordinates.
    /// - `rate_limited` with `details.retry_after_seconds` inside the cooldown
    ///   window, or when the provider reports its quota exhausted.
    /// - `bad_gateway` for any other provider failure.
    pub async fn refresh(
        &self,
        identity: &Identity,
        trip_id: Uuid,
    ) -> Result<WeatherSnapshot, Error> {
        let trip = self.visible_trip(identity, trip_id).await?;
        let Some((latitude, longitude)) = trip.coordinates() else {
            return Err(Error::validation(
                "trip has no coordinates to fetch weather for",
            ));
        };

        if let Some(retry_after) = self.cooldown_remaining(identity, trip_id).await? {
            return Err(Error::rate_limited("weather for this trip was refreshed recently")
                .with_details(json!({ "retry_after_seconds": retry_after })));
        }

        let observation = self
            .source
            .current_conditions(latitude, longitude)
            .await
            .map_err(map_source_error)?;
        let snapshot = self
            .snapshots
            .insert(identity, trip_id, &WeatherSnapshotDraft::open_meteo(observation))
            .await
            .map_err(map_error)?;
        info!(trip_id = %trip_id, snapshot_id = %snapshot.id, "weather refreshed");
        Ok(snapshot)
    }

    /// Seconds left before the next refresh is allowed, if any.
    async fn cooldown_remaining(
        &self,
        identity: &Identity,
        trip_id: Uuid,
    ) -> Result<Option<i64>, Error> {
        let newest = ListRequest {
            limit: PageLimit::new(1).map_err(|err| Error::internal(err.to_string()))?,
            sort: WeatherSort::CreatedAt,
            order: SortOrder::Desc,
            ..ListRequest::default()
        };
        let page = self
            .snapshots
            .list(identity, trip_id, &newest)
            .await
            .map_err(map_error)?;
        let Some(latest) = page.items.first() else {
            return Ok(None);
        };
        let elapsed = self.clock.utc() - latest.created_at;
        let cooldown = TimeDelta::seconds(REFRESH_COOLDOWN_SECONDS);
        if elapsed >= cooldown {
            return Ok(None);
        }
        let remaining = cooldown - elapsed;
        // Round partial seconds up so clients never retry too early.
        let mut seconds = remaining.num_seconds();
        if remaining > TimeDelta::seconds(seconds) {
            seconds += 1;
        }
        Ok(Some(seconds.max(1)))
    }
}
