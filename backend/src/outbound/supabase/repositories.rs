//! Repository ports over PostgREST tables.
//!
//! Row-level security scopes every request to the bearer token's user; the
//! explicit `user_id` filters keep results identical to the in-memory store
//! when policies are looser than expected.

use async_trait::async_trait;
use pagination::Page;
use serde_json::{Value, json};
use uuid::Uuid;

use super::client::SupabaseClient;
use super::postgrest::list_params;
use crate::domain::ports::{
    CatchRepository, RepositoryError, RodRepository, TripRepository, WeatherSnapshotRepository,
};
use crate::domain::{
    Catch, CatchDraft, CatchPatch, Identity, Keyed, ListRequest, Rod, RodDraft, RodPatch,
    RodSort, SortColumn, Trip, TripDraft, TripPatch, TripSort, WeatherSnapshot,
    WeatherSnapshotDraft, WeatherSort, sort_timestamp,
};

const RODS: &str = "rods";
const TRIPS: &str = "trips";
const CATCHES: &str = "catches";
const WEATHER_SNAPSHOTS: &str = "weather_snapshots";

const ROD_SEARCH: &[&str] = &["name", "brand", "model"];
const TRIP_SEARCH: &[&str] = &["title", "location_name", "notes"];
const WEATHER_SEARCH: &[&str] = &["description", "source"];

/// Storage adapter backed by a Supabase project.
#[derive(Clone)]
pub struct SupabaseStore {
    client: SupabaseClient,
}

impl SupabaseStore {
    /// Wrap a configured client.
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    async fn page<T, S>(
        &self,
        identity: &Identity,
        table: &str,
        mut params: Vec<(&'static str, String)>,
        request: &ListRequest<S>,
    ) -> Result<Page<T>, RepositoryError>
    where
        T: Keyed<S> + serde::de::DeserializeOwned,
        S: SortColumn,
    {
        check_cursor(request)?;
        params.push(("user_id", eq(identity.user_id())));
        let rows: Vec<T> = self.client.select(identity, table, &params).await?;
        Ok(Page::from_lookahead(rows, request.limit, |row| {
            row.cursor(request.sort)
        }))
    }

    async fn first<T: serde::de::DeserializeOwned>(
        &self,
        identity: &Identity,
        table: &str,
        id: Uuid,
        soft_deletes: bool,
    ) -> Result<Option<T>, RepositoryError> {
        let mut params = owned_row(identity, id, soft_deletes);
        params.push(("select", "*".to_owned()));
        params.push(("limit", "1".to_owned()));
        let mut rows: Vec<T> = self.client.select(identity, table, &params).await?;
        Ok(rows.pop())
    }

    async fn patch_one<T: serde::de::DeserializeOwned>(
        &self,
        identity: &Identity,
        table: &str,
        id: Uuid,
        soft_deletes: bool,
        changes: &Value,
    ) -> Result<Option<T>, RepositoryError> {
        let params = owned_row(identity, id, soft_deletes);
        let mut rows: Vec<T> = self.client.update(identity, table, &params, changes).await?;
        Ok(rows.pop())
    }

    fn stamped(&self, value: Value) -> Result<Value, RepositoryError> {
        let now = sort_timestamp(&self.client.clock().utc());
        with_fields(value, [("updated_at", Value::String(now))])
    }

    async fn soft_delete_row(
        &self,
        identity: &Identity,
        table: &str,
        id: Uuid,
    ) -> Result<bool, RepositoryError> {
        let now = sort_timestamp(&self.client.clock().utc());
        let changes = json!({ "deleted_at": now, "updated_at": now });
        let params = owned_row(identity, id, true);
        let rows: Vec<Value> = self.client.update(identity, table, &params, &changes).await?;
        Ok(!rows.is_empty())
    }

    async fn delete_row(
        &self,
        identity: &Identity,
        table: &str,
        id: Uuid,
    ) -> Result<bool, RepositoryError> {
        let params = owned_row(identity, id, false);
        Ok(self.client.delete(identity, table, &params).await? > 0)
    }
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

fn owned_row(identity: &Identity, id: Uuid, soft_deletes: bool) -> Vec<(&'static str, String)> {
    let mut params = vec![("id", eq(id)), ("user_id", eq(identity.user_id()))];
    if soft_deletes {
        params.push(("deleted_at", "is.null".to_owned()));
    }
    params
}

fn to_object(value: &impl serde::Serialize) -> Result<Value, RepositoryError> {
    serde_json::to_value(value)
        .map_err(|err| RepositoryError::query(format!("failed to encode row: {err}")))
}

fn with_fields<const N: usize>(
    value: Value,
    fields: [(&str, Value); N],
) -> Result<Value, RepositoryError> {
    let Value::Object(mut map) = value else {
        return Err(RepositoryError::query("row did not encode as an object"));
    };
    for (key, field) in fields {
        map.insert(key.to_owned(), field);
    }
    Ok(Value::Object(map))
}

fn owner(identity: &Identity) -> (&'static str, Value) {
    ("user_id", Value::String(identity.user_id().to_string()))
}

#[async_trait]
impl RodRepository for SupabaseStore {
    async fn list(
        &self,
        identity: &Identity,
        request: &ListRequest<RodSort>,
    ) -> Result<Page<Rod>, RepositoryError> {
        let params = list_params(request, ROD_SEARCH, true);
        self.page(identity, RODS, params, request).await
    }

    async fn find(&self, identity: &Identity, id: Uuid) -> Result<Option<Rod>, RepositoryError> {
        self.first(identity, RODS, id, true).await
    }

    async fn insert(&self, identity: &Identity, draft: &RodDraft) -> Result<Rod, RepositoryError> {
        let row = with_fields(to_object(draft)?, [owner(identity)])?;
        self.client.insert(identity, RODS, &row).await
    }

    async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &RodPatch,
    ) -> Result<Option<Rod>, RepositoryError> {
        let changes = self.stamped(to_object(patch)?)?;
        self.patch_one(identity, RODS, id, true, &changes).await
    }

    async fn soft_delete(&self, identity: &Identity, id: Uuid) -> Result<bool, RepositoryError> {
        self.soft_delete_row(identity, RODS, id).await
    }
}

#[async_trait]
impl TripRepository for SupabaseStore {
    async fn list(
        &self,
        identity: &Identity,
        request: &ListRequest<TripSort>,
    ) -> Result<Page<Trip>, RepositoryError> {
        let params = list_params(request, TRIP_SEARCH, true);
        self.page(identity, TRIPS, params, request).await
    }

    async fn find(&self, identity: &Identity, id: Uuid) -> Result<Option<Trip>, RepositoryError> {
        self.first(identity, TRIPS, id, true).await
    }

    async fn insert(&self, identity: &Identity, draft: &TripDraft) -> Result<Trip, RepositoryError> {
        let row = with_fields(to_object(draft)?, [owner(identity)])?;
        self.client.insert(identity, TRIPS, &row).await
    }

    async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &TripPatch,
    ) -> Result<Option<Trip>, RepositoryError> {
        let changes = self.stamped(to_object(patch)?)?;
        self.patch_one(identity, TRIPS, id, true, &changes).await
    }

    async fn soft_delete(&self, identity: &Identity, id: Uuid) -> Result<bool, RepositoryError> {
        self.soft_delete_row(identity, TRIPS, id).await
    }
}

#[async_trait]
impl CatchRepository for SupabaseStore {
    async fn list_for_trip(
        &self,
        identity: &Identity,
        trip_id: Uuid,
    ) -> Result<Vec<Catch>, RepositoryError> {
        let params = [
            ("select", "*".to_owned()),
            ("trip_id", eq(trip_id)),
            ("user_id", eq(identity.user_id())),
            ("order", "caught_at.asc,id.asc".to_owned()),
        ];
        self.client.select(identity, CATCHES, &params).await
    }

    async fn insert(
        &self,
        identity: &Identity,
        trip_id: Uuid,
        draft: &CatchDraft,
    ) -> Result<Catch, RepositoryError> {
        let row = with_fields(
            to_object(draft)?,
            [owner(identity), ("trip_id", Value::String(trip_id.to_string()))],
        )?;
        self.client.insert(identity, CATCHES, &row).await
    }

    async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &CatchPatch,
    ) -> Result<Option<Catch>, RepositoryError> {
        let changes = to_object(patch)?;
        self.patch_one(identity, CATCHES, id, false, &changes).await
    }

    async fn delete(&self, identity: &Identity, id: Uuid) -> Result<bool, RepositoryError> {
        self.delete_row(identity, CATCHES, id).await
    }
}

#[async_trait]
impl WeatherSnapshotRepository for SupabaseStore {
    async fn list(
        &self,
        identity: &Identity,
        trip_id: Uuid,
        request: &ListRequest<WeatherSort>,
    ) -> Result<Page<WeatherSnapshot>, RepositoryError> {
        let mut params = list_params(request, WEATHER_SEARCH, false);
        params.push(("trip_id", eq(trip_id)));
        self.page(identity, WEATHER_SNAPSHOTS, params, request).await
    }

    async fn insert(
        &self,
        identity: &Identity,
        trip_id: Uuid,
        draft: &WeatherSnapshotDraft,
    ) -> Result<WeatherSnapshot, RepositoryError> {
        let row = with_fields(
            to_object(draft)?,
            [owner(identity), ("trip_id", Value::String(trip_id.to_string()))],
        )?;
        self.client.insert(identity, WEATHER_SNAPSHOTS, &row).await
    }

    async fn delete(&self, identity: &Identity, id: Uuid) -> Result<bool, RepositoryError> {
        self.delete_row(identity, WEATHER_SNAPSHOTS, id).await
    }
}

/// Reject cursors PostgREST could not compare against the sort column.
fn check_cursor<S: SortColumn>(request: &ListRequest<S>) -> Result<(), RepositoryError> {
    let Some(cursor) = &request.cursor else {
        return Ok(());
    };
    Uuid::parse_str(cursor.id())
        .map_err(|_| RepositoryError::invalid_reference("cursor does not reference a row id"))?;
    if request.sort.accepts_sort_value(cursor.sort_value()) {
        Ok(())
    } else {
        Err(RepositoryError::invalid_reference(format!(
            "cursor value does not fit column {}",
            request.sort.column()
        )))
    }
}
