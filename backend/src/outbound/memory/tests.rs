//! Behaviour of the in-memory tables: ownership, soft deletion, uniqueness
//! and keyset paging.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use pagination::{CursorData, PageLimit, SortOrder};
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::MemoryStore;
use crate::domain::ports::{CatchRepository, RepositoryError, RodRepository, TripRepository};
use crate::domain::{
    AccessToken, CatchDraft, Email, Identity, ListRequest, RodDraft, RodPatch, RodSort, TripDraft,
    TripSort, UserId,
};
use crate::test_support::MutableClock;

fn start() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T08:00:00Z")
        .expect("timestamp")
        .with_timezone(&Utc)
}

#[fixture]
fn clocked_store() -> (MemoryStore, Arc<MutableClock>) {
    let clock = Arc::new(MutableClock::new(start()));
    (MemoryStore::new(clock.clone()), clock)
}

#[fixture]
fn store() -> MemoryStore {
    MemoryStore::new(Arc::new(MutableClock::new(start())))
}

fn angler(email: &str) -> Identity {
    Identity::new(
        UserId::random(),
        Email::new(email).expect("email"),
        AccessToken::new("token").expect("token"),
    )
}

fn rod_draft(name: &str) -> RodDraft {
    RodDraft {
        name: name.to_owned(),
        brand: None,
        model: None,
        length_m: None,
        power: None,
        action: None,
        notes: None,
    }
}

fn trip_draft(title: &str) -> TripDraft {
    TripDraft {
        title: title.to_owned(),
        location_name: None,
        latitude: None,
        longitude: None,
        started_at: start(),
        ended_at: None,
        notes: None,
    }
}

#[rstest]
#[tokio::test]
async fn rod_names_are_unique_per_angler(store: MemoryStore) {
    let alice = angler("alice@example.com");
    let bob = angler("bob@example.com");
    RodRepository::insert(&store, &alice, &rod_draft("Feeder")).await.expect("first");

    let err = RodRepository::insert(&store, &alice, &rod_draft("Feeder"))
        .await
        .expect_err("duplicate");
    assert!(matches!(err, RepositoryError::Conflict { .. }));

    RodRepository::insert(&store, &bob, &rod_draft("Feeder"))
        .await
        .expect("other angler may reuse the name");
}

#[rstest]
#[tokio::test]
async fn deleted_rod_frees_its_name(store: MemoryStore) {
    let alice = angler("alice@example.com");
    let rod = RodRepository::insert(&store, &alice, &rod_draft("Feeder")).await.expect("rod");
    assert!(RodRepository::soft_delete(&store, &alice, rod.id).await.expect("delete"));
    assert!(RodRepository::find(&store, &alice, rod.id).await.expect("find").is_none());
    RodRepository::insert(&store, &alice, &rod_draft("Feeder")).await.expect("reuse");
}

#[rstest]
#[tokio::test]
async fn renaming_onto_existing_name_conflicts(store: MemoryStore) {
    let alice = angler("alice@example.com");
    RodRepository::insert(&store, &alice, &rod_draft("Feeder")).await.expect("a");
    let other = RodRepository::insert(&store, &alice, &rod_draft("Spinner")).await.expect("b");
    let patch = RodPatch {
        name: Some("Feeder".into()),
        ..RodPatch::default()
    };
    let err = RodRepository::update(&store, &alice, other.id, &patch)
        .await
        .expect_err("conflict");
    assert!(matches!(err, RepositoryError::Conflict { .. }));
}

#[rstest]
#[tokio::test]
async fn rows_are_invisible_to_other_anglers(store: MemoryStore) {
    let alice = angler("alice@example.com");
    let bob = angler("bob@example.com");
    let trip = TripRepository::insert(&store, &alice, &trip_draft("Private")).await.expect("trip");

    assert!(TripRepository::find(&store, &bob, trip.id).await.expect("find").is_none());
    assert!(!TripRepository::soft_delete(&store, &bob, trip.id).await.expect("delete"));
    let page = TripRepository::list(&store, &bob, &ListRequest::default())
        .await
        .expect("list");
    assert!(page.items.is_empty());
}

#[rstest]
#[tokio::test]
async fn include_deleted_lists_soft_deleted_rows(store: MemoryStore) {
    let alice = angler("alice@example.com");
    let trip = TripRepository::insert(&store, &alice, &trip_draft("Gone")).await.expect("trip");
    TripRepository::soft_delete(&store, &alice, trip.id).await.expect("delete");

    let hidden = TripRepository::list(&store, &alice, &ListRequest::default())
        .await
        .expect("list");
    assert!(hidden.items.is_empty());

    let request = ListRequest::<TripSort> {
        include_deleted: true,
        ..ListRequest::default()
    };
    let shown = TripRepository::list(&store, &alice, &request).await.expect("list");
    assert_eq!(shown.items.len(), 1);
    assert!(shown.items[0].deleted_at.is_some());
}

#[rstest]
#[tokio::test]
async fn search_is_case_insensitive(store: MemoryStore) {
    let alice = angler("alice@example.com");
    for name in ["Pike Special", "Carp Feeder", "Light Spinner"] {
        RodRepository::insert(&store, &alice, &rod_draft(name)).await.expect("rod");
    }
    let request = ListRequest::<RodSort> {
        search: Some("PIKE".into()),
        ..ListRequest::default()
    };
    let page = RodRepository::list(&store, &alice, &request).await.expect("list");
    let names: Vec<_> = page.items.iter().map(|rod| rod.name.as_str()).collect();
    assert_eq!(names, vec!["Pike Special"]);
}

#[rstest]
#[case(SortOrder::Asc)]
#[case(SortOrder::Desc)]
#[tokio::test]
async fn paging_visits_every_row_once(store: MemoryStore, #[case] order: SortOrder) {
    let alice = angler("alice@example.com");
    // All rods share one created_at, so the id tie-breaker decides.
    for index in 0..23 {
        RodRepository::insert(&store, &alice, &rod_draft(&format!("rod-{index:02}")))
            .await
            .expect("rod");
    }

    let mut seen = Vec::new();
    let mut cursor: Option<CursorData> = None;
    loop {
        let request = ListRequest {
            limit: PageLimit::new(5).expect("limit"),
            cursor: cursor.clone(),
            sort: RodSort::CreatedAt,
            order,
            ..ListRequest::default()
        };
        let page = RodRepository::list(&store, &alice, &request).await.expect("page");
        assert!(page.items.len() <= 5);
        seen.extend(page.items.iter().map(|rod| rod.id));
        match page.next_cursor {
            Some(token) => cursor = Some(CursorData::decode(&token).expect("valid cursor")),
            None => break,
        }
    }

    assert_eq!(seen.len(), 23);
    let unique: HashSet<Uuid> = seen.iter().copied().collect();
    assert_eq!(unique.len(), 23);
    let mut sorted = seen.clone();
    sorted.sort();
    assert_eq!(seen, sorted, "equal sort values fall back to ascending id");
}

#[rstest]
#[tokio::test]
async fn timestamp_order_follows_clock(clocked_store: (MemoryStore, Arc<MutableClock>)) {
    let (store, clock) = clocked_store;
    let alice = angler("alice@example.com");
    let first = RodRepository::insert(&store, &alice, &rod_draft("first")).await.expect("a");
    clock.advance_seconds(1);
    let second = RodRepository::insert(&store, &alice, &rod_draft("second")).await.expect("b");

    let request = ListRequest {
        sort: RodSort::CreatedAt,
        order: SortOrder::Desc,
        ..ListRequest::default()
    };
    let page = RodRepository::list(&store, &alice, &request).await.expect("list");
    let ids: Vec<_> = page.items.iter().map(|rod| rod.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[rstest]
#[tokio::test]
async fn catches_reject_foreign_rods_and_sort_by_time(store: MemoryStore) {
    let alice = angler("alice@example.com");
    let bob = angler("bob@example.com");
    let trip = TripRepository::insert(&store, &alice, &trip_draft("Evening")).await.expect("trip");
    let bobs_rod = RodRepository::insert(&store, &bob, &rod_draft("Bob's")).await.expect("rod");

    let draft = CatchDraft {
        species: "Zander".into(),
        length_cm: None,
        weight_kg: None,
        caught_at: start(),
        rod_id: Some(bobs_rod.id),
        released: true,
        notes: None,
    };
    let err = CatchRepository::insert(&store, &alice, trip.id, &draft)
        .await
        .expect_err("foreign rod");
    assert!(matches!(err, RepositoryError::InvalidReference { .. }));

    let late = CatchDraft {
        rod_id: None,
        caught_at: start() + chrono::Duration::hours(2),
        ..draft.clone()
    };
    let early = CatchDraft {
        rod_id: None,
        species: "Perch".into(),
        ..draft
    };
    CatchRepository::insert(&store, &alice, trip.id, &late).await.expect("late");
    CatchRepository::insert(&store, &alice, trip.id, &early).await.expect("early");

    let rows = CatchRepository::list_for_trip(&store, &alice, trip.id).await.expect("list");
    let species: Vec<_> = rows.iter().map(|catch| catch.species.as_str()).collect();
    assert_eq!(species, vec!["Perch", "Zander"]);
}
