//! Rod CRUD, keyset pagination and soft deletion over the full router.

#[allow(dead_code)]
#[path = "support/http.rs"]
mod http_support;

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::test as actix_test;
use http_support::{Upstream, login, send, start_of_season, test_app};
use logbook::test_support::MutableClock;
use rstest::rstest;
use serde_json::{Value, json};

async fn create_rod<S>(app: &S, cookie: &Cookie<'static>, name: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let reply = send(
        app,
        Method::POST,
        "/api/v1/rods",
        Some(cookie),
        Some(json!({"name": name, "length_m": 2.4})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "create {name}");
    reply.body["data"].clone()
}

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|rod| rod["name"].as_str().expect("name").to_owned())
        .collect()
}

#[rstest]
#[actix_web::test]
async fn rod_lifecycle() {
    let clock = Arc::new(MutableClock::new(start_of_season()));
    let app = actix_test::init_service(test_app(clock.clone(), Upstream::Calm)).await;
    let cookie = login(&app).await;

    let rod = create_rod(&app, &cookie, "Spinning 2.4").await;
    let id = rod["id"].as_str().expect("id").to_owned();
    assert_eq!(rod["length_m"], json!(2.4));
    assert_eq!(rod["deleted_at"], Value::Null);

    clock.advance_seconds(60);
    let updated = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/rods/{id}"),
        Some(&cookie),
        Some(json!({"brand": "Daiwa", "length_m": null})),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["brand"], "Daiwa");
    assert_eq!(updated.body["data"]["length_m"], Value::Null);
    assert_ne!(updated.body["data"]["updated_at"], rod["updated_at"]);

    let fetched = send(&app, Method::GET, &format!("/api/v1/rods/{id}"), Some(&cookie), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["brand"], "Daiwa");

    let deleted =
        send(&app, Method::DELETE, &format!("/api/v1/rods/{id}"), Some(&cookie), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(deleted.body, Value::Null);

    let gone = send(&app, Method::GET, &format!("/api/v1/rods/{id}"), Some(&cookie), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["error"]["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn duplicate_name_conflicts() {
    let clock = Arc::new(MutableClock::new(start_of_season()));
    let app = actix_test::init_service(test_app(clock, Upstream::Calm)).await;
    let cookie = login(&app).await;

    create_rod(&app, &cookie, "Fly 9ft").await;
    let reply = send(
        &app,
        Method::POST,
        "/api/v1/rods",
        Some(&cookie),
        Some(json!({"name": "Fly 9ft"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.body["error"]["code"], "conflict");
    assert_eq!(reply.error_details()["field"], "name");
}

#[rstest]
#[case(json!({}), "name", "is required")]
#[case(json!({"name": "   "}), "name", "must not be empty")]
#[case(json!({"name": "Pike", "length_m": 0}), "length_m", "must be greater than 0 and at most 10")]
#[case(json!({"name": "Pike", "length_m": "long"}), "length_m", "must be a number")]
#[actix_web::test]
async fn invalid_rod_bodies(#[case] payload: Value, #[case] field: &str, #[case] reason: &str) {
    let clock = Arc::new(MutableClock::new(start_of_season()));
    let app = actix_test::init_service(test_app(clock, Upstream::Calm)).await;
    let cookie = login(&app).await;

    let reply = send(&app, Method::POST, "/api/v1/rods", Some(&cookie), Some(payload)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"]["code"], "validation_error");
    assert_eq!(reply.error_details(), &json!({"field": field, "reason": reason}));
}

#[rstest]
#[actix_web::test]
async fn pages_follow_the_link_header() {
    let clock = Arc::new(MutableClock::new(start_of_season()));
    let app = actix_test::init_service(test_app(clock, Upstream::Calm)).await;
    let cookie = login(&app).await;

    for name in ["Echo", "Alpha", "Delta", "Bravo", "Charlie"] {
        create_rod(&app, &cookie, name).await;
    }

    let mut uri = "/api/v1/rods?sort=name&order=asc&limit=2".to_owned();
    let mut seen = Vec::new();
    let mut pages = 0;
    loop {
        let reply = send(&app, Method::GET, &uri, Some(&cookie), None).await;
        assert_eq!(reply.status, StatusCode::OK);
        pages += 1;
        seen.extend(names(&reply.body));
        let Some(cursor) = reply.body["nextCursor"].as_str() else {
            assert!(reply.header("link").is_none(), "last page has no link");
            break;
        };
        let link = reply.header("link").expect("link header");
        assert!(link.contains("rel=\"next\""));
        assert!(link.contains("cursor="));
        uri = format!("/api/v1/rods?sort=name&order=asc&limit=2&cursor={cursor}");
    }

    assert_eq!(pages, 3);
    assert_eq!(seen, ["Alpha", "Bravo", "Charlie", "Delta", "Echo"]);
}

#[rstest]
#[case("cursor=!!!", "cursor", "invalid cursor")]
#[case("limit=0", "limit", "must be between 1 and 100")]
#[case("sort=weight", "sort", "must be one of: name, created_at, updated_at")]
#[case("order=sideways", "order", "must be one of: asc, desc")]
#[actix_web::test]
async fn invalid_list_queries(#[case] query: &str, #[case] field: &str, #[case] reason: &str) {
    let clock = Arc::new(MutableClock::new(start_of_season()));
    let app = actix_test::init_service(test_app(clock, Upstream::Calm)).await;
    let cookie = login(&app).await;

    let reply = send(&app, Method::GET, &format!("/api/v1/rods?{query}"), Some(&cookie), None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.error_details(), &json!({"field": field, "reason": reason}));
}

#[rstest]
#[actix_web::test]
async fn deleted_rods_only_listed_on_request() {
    let clock = Arc::new(MutableClock::new(start_of_season()));
    let app = actix_test::init_service(test_app(clock, Upstream::Calm)).await;
    let cookie = login(&app).await;

    create_rod(&app, &cookie, "Keeper").await;
    let retired = create_rod(&app, &cookie, "Retired").await;
    let id = retired["id"].as_str().expect("id");
    send(&app, Method::DELETE, &format!("/api/v1/rods/{id}"), Some(&cookie), None).await;

    let live = send(&app, Method::GET, "/api/v1/rods", Some(&cookie), None).await;
    assert_eq!(names(&live.body), ["Keeper"]);

    let all = send(&app, Method::GET, "/api/v1/rods?include_deleted=true", Some(&cookie), None).await;
    assert_eq!(names(&all.body), ["Keeper", "Retired"]);
    assert!(all.body["data"][1]["deleted_at"].is_string());

    let search = send(&app, Method::GET, "/api/v1/rods?q=keep", Some(&cookie), None).await;
    assert_eq!(names(&search.body), ["Keeper"]);
}
