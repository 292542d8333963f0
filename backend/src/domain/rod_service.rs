//! Rod use-cases.

use std::sync::Arc;

use pagination::Page;
use serde_json::json;
use uuid::Uuid;

use super::ports::{RepositoryError, RodRepository};
use super::storage_errors::{map_repository_error, not_found};
use super::{Error, Identity, ListRequest, Rod, RodDraft, RodPatch, RodSort};

const ENTITY: &str = "rod";

fn map_error(err: RepositoryError) -> Error {
    match err {
        RepositoryError::Conflict { .. } => Error::conflict("a rod with this name already exists")
            .with_details(json!({ "field": "name", "reason": "already in use" })),
        other => map_repository_error(ENTITY, other),
    }
}

/// Rod operations on behalf of the calling angler.
#[derive(Clone)]
pub struct RodService {
    rods: Arc<dyn RodRepository>,
}

impl RodService {
    /// Create the service over a rod repository.
    pub fn new(rods: Arc<dyn RodRepository>) -> Self {
        Self { rods }
    }

    /// One page of the caller's rods.
    pub async fn list(
        &self,
        identity: &Identity,
        request: &ListRequest<RodSort>,
    ) -> Result<Page<Rod>, Error> {
        self.rods.list(identity, request).await.map_err(map_error)
    }

    /// A single rod.
    pub async fn get(&self, identity: &Identity, id: Uuid) -> Result<Rod, Error> {
        self.rods
            .find(identity, id)
            .await
            .map_err(map_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    /// Record a new rod.
    pub async fn create(&self, identity: &Identity, draft: &RodDraft) -> Result<Rod, Error> {
        self.rods.insert(identity, draft).await.map_err(map_error)
    }

    /// Change fields of a rod.
    pub async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &RodPatch,
    ) -> Result<Rod, Error> {
        self.rods
            .update(identity, id, patch)
            .await
            .map_err(map_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    /// Soft-delete a rod.
    pub async fn delete(&self, identity: &Identity, id: Uuid) -> Result<(), Error> {
        if self.rods.soft_delete(identity, id).await.map_err(map_error)? {
            Ok(())
        } else {
            Err(not_found(ENTITY, id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::fixtures::{identity, rod};
    use crate::domain::ports::MockRodRepository;
    use rstest::rstest;

    fn draft() -> RodDraft {
        RodDraft {
            name: "Feeder 3.6".into(),
            brand: None,
            model: None,
            length_m: Some(3.6),
            power: None,
            action: None,
            notes: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_name_is_conflict_on_name(identity: Identity) {
        let mut repo = MockRodRepository::new();
        repo.expect_insert()
            .times(1)
            .return_once(|_, _| Err(RepositoryError::conflict("rods_user_name_key")));
        let service = RodService::new(Arc::new(repo));

        let err = service.create(&identity, &draft()).await.expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.http_status(), 409);
        assert_eq!(err.details(), Some(&json!({"field": "name", "reason": "already in use"})));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_rod_is_not_found(identity: Identity) {
        let mut repo = MockRodRepository::new();
        repo.expect_find().return_once(|_, _| Ok(None));
        let service = RodService::new(Arc::new(repo));

        let err = service.get(&identity, Uuid::nil()).await.expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_missing_rod(identity: Identity) {
        let mut repo = MockRodRepository::new();
        repo.expect_soft_delete().return_once(|_, _| Ok(false));
        let service = RodService::new(Arc::new(repo));

        let err = service.delete(&identity, Uuid::nil()).await.expect_err("missing");
        assert_eq!(err.http_status(), 404);
    }

    #[rstest]
    #[tokio::test]
    async fn update_returns_stored_row(identity: Identity) {
        let stored = rod(&identity, "Feeder 3.9");
        let expected = stored.clone();
        let mut repo = MockRodRepository::new();
        repo.expect_update()
            .withf(|_, _, patch| patch.name.as_deref() == Some("Feeder 3.9"))
            .return_once(move |_, _, _| Ok(Some(stored)));
        let service = RodService::new(Arc::new(repo));

        let patch = RodPatch {
            name: Some("Feeder 3.9".into()),
            ..RodPatch::default()
        };
        let updated = service.update(&identity, expected.id, &patch).await.expect("updated");
        assert_eq!(updated, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failure_is_bad_gateway(identity: Identity) {
        let mut repo = MockRodRepository::new();
        repo.expect_list()
            .return_once(|_, _| Err(RepositoryError::connection("refused")));
        let service = RodService::new(Arc::new(repo));

        let err = service
            .list(&identity, &ListRequest::default())
            .await
            .expect_err("unavailable");
        assert_eq!(err.http_status(), 502);
    }
}
