//! Catch table.

use async_trait::async_trait;
use uuid::Uuid;

use super::{MemoryStore, Tables};
use crate::domain::ports::{CatchRepository, RepositoryError};
use crate::domain::{Catch, CatchDraft, CatchPatch, Identity, UserId};

fn check_references(
    tables: &Tables,
    user_id: UserId,
    trip_id: Uuid,
    rod_id: Option<Uuid>,
) -> Result<(), RepositoryError> {
    let trip_ok = tables
        .trips
        .iter()
        .any(|trip| trip.id == trip_id && trip.user_id == user_id);
    if !trip_ok {
        return Err(RepositoryError::invalid_reference(format!("trip {trip_id}")));
    }
    if let Some(rod_id) = rod_id {
        let rod_ok = tables
            .rods
            .iter()
            .any(|rod| rod.id == rod_id && rod.user_id == user_id);
        if !rod_ok {
            return Err(RepositoryError::invalid_reference(format!("rod {rod_id}")));
        }
    }
    Ok(())
}

#[async_trait]
impl CatchRepository for MemoryStore {
    async fn list_for_trip(
        &self,
        identity: &Identity,
        trip_id: Uuid,
    ) -> Result<Vec<Catch>, RepositoryError> {
        let user_id = identity.user_id();
        let mut rows: Vec<Catch> = self
            .read()?
            .catches
            .iter()
            .filter(|catch| catch.trip_id == trip_id && catch.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|left, right| {
            left.caught_at
                .cmp(&right.caught_at)
                .then_with(|| left.id.cmp(&right.id))
        });
        Ok(rows)
    }

    async fn insert(
        &self,
        identity: &Identity,
        trip_id: Uuid,
        draft: &CatchDraft,
    ) -> Result<Catch, RepositoryError> {
        let user_id = identity.user_id();
        let now = self.now();
        let mut tables = self.write()?;
        check_references(&tables, user_id, trip_id, draft.rod_id)?;
        let catch = Catch {
            id: Uuid::new_v4(),
            user_id,
            trip_id,
            species: draft.species.clone(),
            length_cm: draft.length_cm,
            weight_kg: draft.weight_kg,
            caught_at: draft.caught_at,
            rod_id: draft.rod_id,
            released: draft.released,
            notes: draft.notes.clone(),
            created_at: now,
        };
        tables.catches.push(catch.clone());
        Ok(catch)
    }

    async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &CatchPatch,
    ) -> Result<Option<Catch>, RepositoryError> {
        let user_id = identity.user_id();
        let mut tables = self.write()?;
        let Some(index) = tables
            .catches
            .iter()
            .position(|catch| catch.id == id && catch.user_id == user_id)
        else {
            return Ok(None);
        };
        let trip_id = tables.catches[index].trip_id;
        check_references(&tables, user_id, trip_id, patch.linked_rod())?;
        let catch = &mut tables.catches[index];
        patch.apply_to(catch);
        Ok(Some(catch.clone()))
    }

    async fn delete(&self, identity: &Identity, id: Uuid) -> Result<bool, RepositoryError> {
        let user_id = identity.user_id();
        let mut tables = self.write()?;
        let before = tables.catches.len();
        tables
            .catches
            .retain(|catch| !(catch.id == id && catch.user_id == user_id));
        Ok(tables.catches.len() != before)
    }
}
