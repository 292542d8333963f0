//! Rod table.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use super::{MemoryStore, Tables, search_matches};
use crate::domain::ports::{RepositoryError, RodRepository};
use crate::domain::{
    Identity, Keyed, ListRequest, Rod, RodDraft, RodPatch, RodSort, UserId, apply_keyset,
};

fn name_taken(tables: &Tables, user_id: UserId, name: &str, except: Option<Uuid>) -> bool {
    tables.rods.iter().any(|rod| {
        rod.user_id == user_id
            && rod.deleted_at.is_none()
            && rod.name == name
            && Some(rod.id) != except
    })
}

fn visible_rod(tables: &mut Tables, user_id: UserId, id: Uuid) -> Option<&mut Rod> {
    tables
        .rods
        .iter_mut()
        .find(|rod| rod.id == id && rod.user_id == user_id && rod.deleted_at.is_none())
}

#[async_trait]
impl RodRepository for MemoryStore {
    async fn list(
        &self,
        identity: &Identity,
        request: &ListRequest<RodSort>,
    ) -> Result<Page<Rod>, RepositoryError> {
        let user_id = identity.user_id();
        let rows: Vec<Rod> = self
            .read()?
            .rods
            .iter()
            .filter(|rod| rod.user_id == user_id)
            .filter(|rod| request.include_deleted || rod.deleted_at.is_none())
            .filter(|rod| search_matches(request.search.as_deref(), |term| rod.matches(term)))
            .cloned()
            .collect();
        let rows = apply_keyset(rows, request);
        Ok(Page::from_lookahead(rows, request.limit, |rod| {
            rod.cursor(request.sort)
        }))
    }

    async fn find(&self, identity: &Identity, id: Uuid) -> Result<Option<Rod>, RepositoryError> {
        let user_id = identity.user_id();
        Ok(self
            .read()?
            .rods
            .iter()
            .find(|rod| rod.id == id && rod.user_id == user_id && rod.deleted_at.is_none())
            .cloned())
    }

    async fn insert(&self, identity: &Identity, draft: &RodDraft) -> Result<Rod, RepositoryError> {
        let user_id = identity.user_id();
        let now = self.now();
        let mut tables = self.write()?;
        if name_taken(&tables, user_id, &draft.name, None) {
            return Err(RepositoryError::conflict(format!(
                "rod name {:?} already exists",
                draft.name
            )));
        }
        let rod = Rod {
            id: Uuid::new_v4(),
            user_id,
            name: draft.name.clone(),
            brand: draft.brand.clone(),
            model: draft.model.clone(),
            length_m: draft.length_m,
            power: draft.power.clone(),
            action: draft.action.clone(),
            notes: draft.notes.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.rods.push(rod.clone());
        Ok(rod)
    }

    async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &RodPatch,
    ) -> Result<Option<Rod>, RepositoryError> {
        let user_id = identity.user_id();
        let now = self.now();
        let mut tables = self.write()?;
        if let Some(name) = &patch.name {
            if name_taken(&tables, user_id, name, Some(id)) {
                return Err(RepositoryError::conflict(format!(
                    "rod name {name:?} already exists"
                )));
            }
        }
        Ok(visible_rod(&mut tables, user_id, id).map(|rod| {
            patch.apply_to(rod);
            rod.updated_at = now;
            rod.clone()
        }))
    }

    async fn soft_delete(&self, identity: &Identity, id: Uuid) -> Result<bool, RepositoryError> {
        let user_id = identity.user_id();
        let now = self.now();
        let mut tables = self.write()?;
        Ok(visible_rod(&mut tables, user_id, id)
            .map(|rod| {
                rod.deleted_at = Some(now);
                rod.updated_at = now;
            })
            .is_some())
    }
}
