//! Trip API handlers.
//!
//! ```text
//! GET    /api/v1/trips?q=&include_deleted=&limit=&cursor=&sort=&order=
//! POST   /api/v1/trips {"title":"Dawn on the Lech","started_at":"2026-05-01T05:00:00Z"}
//! GET    /api/v1/trips/{id}
//! PATCH  /api/v1/trips/{id} {"ended_at":"2026-05-01T09:30:00Z"}
//! DELETE /api/v1/trips/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};

use crate::domain::trips::{
    ENDED_BEFORE_STARTED, LOCATION_NAME_MAX, TRIP_TITLE_MAX, window_is_valid,
};
use crate::domain::{Error, NOTES_MAX, TripDraft, TripPatch, TripSort};
use crate::inbound::http::ApiResult;
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::response;
use crate::inbound::http::schemas::{ErrorEnvelope, TripEnvelope, TripInput, TripPage};
use crate::inbound::http::validation::{
    BodyReader, RawListQuery, coordinate_pair, list_query, patched_coordinate_pair, path_uuid,
    rules,
};

/// Create schema.
pub(crate) fn trip_draft(bytes: &[u8]) -> Result<TripDraft, Error> {
    let mut body = BodyReader::parse(bytes)?;
    let draft = TripDraft {
        title: body.required("title", rules::text::<TRIP_TITLE_MAX>),
        location_name: body.optional("location_name", rules::text::<LOCATION_NAME_MAX>),
        latitude: body.optional("latitude", rules::latitude),
        longitude: body.optional("longitude", rules::longitude),
        started_at: body.required("started_at", rules::timestamp),
        ended_at: body.optional("ended_at", rules::timestamp),
        notes: body.optional("notes", rules::text::<NOTES_MAX>),
    };
    coordinate_pair(&mut body, draft.latitude.is_some(), draft.longitude.is_some());
    body.refine(
        window_is_valid(draft.started_at, draft.ended_at),
        "ended_at",
        ENDED_BEFORE_STARTED,
    );
    Ok(body.finish(draft)?)
}

/// Update schema.
///
/// A patch moving only one end of the window is checked against the stored
/// trip by the service.
pub(crate) fn trip_patch(bytes: &[u8]) -> Result<TripPatch, Error> {
    let mut body = BodyReader::parse(bytes)?;
    let patch = TripPatch {
        title: body.patch("title", rules::text::<TRIP_TITLE_MAX>),
        location_name: body.patch_nullable("location_name", rules::text::<LOCATION_NAME_MAX>),
        latitude: body.patch_nullable("latitude", rules::latitude),
        longitude: body.patch_nullable("longitude", rules::longitude),
        started_at: body.patch("started_at", rules::timestamp),
        ended_at: body.patch_nullable("ended_at", rules::timestamp),
        notes: body.patch_nullable("notes", rules::text::<NOTES_MAX>),
    };
    body.require_change(patch.is_empty());
    patched_coordinate_pair(&mut body, patch.latitude, patch.longitude);
    if let (Some(started_at), Some(ended_at)) = (patch.started_at, patch.ended_at) {
        body.refine(
            window_is_valid(started_at, ended_at),
            "ended_at",
            ENDED_BEFORE_STARTED,
        );
    }
    Ok(body.finish(patch)?)
}

/// List the caller's trips.
#[utoipa::path(
    get,
    path = "/api/v1/trips",
    params(crate::inbound::http::schemas::ListParams),
    responses(
        (status = 200, description = "One page of trips", body = TripPage),
        (status = 400, description = "Invalid query", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope)
    ),
    tags = ["trips"],
    operation_id = "listTrips"
)]
#[get("/trips")]
pub async fn list_trips(ctx: RequestContext, req: HttpRequest) -> ApiResult<HttpResponse> {
    let request = list_query::<TripSort>(RawListQuery::from_query_string(req.query_string())?)?;
    let page = ctx.state.trips.list(&ctx.identity, &request).await?;
    Ok(response::page(&req, page))
}

/// Record a trip.
#[utoipa::path(
    post,
    path = "/api/v1/trips",
    request_body = TripInput,
    responses(
        (status = 201, description = "Trip created", body = TripEnvelope),
        (status = 400, description = "Invalid body", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope)
    ),
    tags = ["trips"],
    operation_id = "createTrip"
)]
#[post("/trips")]
pub async fn create_trip(ctx: RequestContext, payload: web::Bytes) -> ApiResult<HttpResponse> {
    let draft = trip_draft(&payload)?;
    let trip = ctx.state.trips.create(&ctx.identity, &draft).await?;
    Ok(response::created(trip))
}

/// Fetch one trip.
#[utoipa::path(
    get,
    path = "/api/v1/trips/{id}",
    params(("id" = String, Path, description = "Trip id")),
    responses(
        (status = 200, description = "Trip", body = TripEnvelope),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "Not found", body = ErrorEnvelope)
    ),
    tags = ["trips"],
    operation_id = "getTrip"
)]
#[get("/trips/{id}")]
pub async fn get_trip(ctx: RequestContext, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = path_uuid("id", &path)?;
    let trip = ctx.state.trips.get(&ctx.identity, id).await?;
    Ok(response::ok(trip))
}

/// Change fields of a trip; `null` clears optional fields.
#[utoipa::path(
    patch,
    path = "/api/v1/trips/{id}",
    params(("id" = String, Path, description = "Trip id")),
    request_body = TripInput,
    responses(
        (status = 200, description = "Updated trip", body = TripEnvelope),
        (status = 400, description = "Invalid body or window", body = ErrorEnvelope),
        (status = 404, description = "Not found", body = ErrorEnvelope)
    ),
    tags = ["trips"],
    operation_id = "updateTrip"
)]
#[patch("/trips/{id}")]
pub async fn update_trip(
    ctx: RequestContext,
    path: web::Path<String>,
    payload: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = path_uuid("id", &path)?;
    let patch = trip_patch(&payload)?;
    let trip = ctx.state.trips.update(&ctx.identity, id, &patch).await?;
    Ok(response::ok(trip))
}

/// Soft-delete a trip.
#[utoipa::path(
    delete,
    path = "/api/v1/trips/{id}",
    params(("id" = String, Path, description = "Trip id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorEnvelope)
    ),
    tags = ["trips"],
    operation_id = "deleteTrip"
)]
#[delete("/trips/{id}")]
pub async fn delete_trip(ctx: RequestContext, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = path_uuid("id", &path)?;
    ctx.state.trips.delete(&ctx.identity, id).await?;
    Ok(response::no_content())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn bytes(value: Value) -> Vec<u8> {
        value.to_string().into_bytes()
    }

    #[rstest]
    #[case(json!({"started_at": "2026-05-01T05:00:00Z"}), "title", "is required")]
    #[case(json!({"title": "Dawn"}), "started_at", "is required")]
    #[case(json!({"title": "Dawn", "started_at": "dawn"}), "started_at", "must be an RFC 3339 timestamp")]
    #[case(
        json!({"title": "Dawn", "started_at": "2026-05-01T05:00:00Z", "latitude": 91}),
        "latitude",
        "must be between -90 and 90"
    )]
    #[case(
        json!({"title": "Dawn", "started_at": "2026-05-01T05:00:00Z", "latitude": 47.5}),
        "longitude",
        "is required when latitude is set"
    )]
    #[case(
        json!({"title": "Dawn", "started_at": "2026-05-01T05:00:00Z", "ended_at": "2026-05-01T04:59:59Z"}),
        "ended_at",
        "must not be earlier than started_at"
    )]
    fn draft_rejections(#[case] body: Value, #[case] field: &str, #[case] reason: &str) {
        let error = trip_draft(&bytes(body)).expect_err("invalid draft");
        assert_eq!(
            error.details(),
            Some(&json!({"field": field, "reason": reason}))
        );
    }

    #[rstest]
    fn equal_window_ends_are_accepted() {
        let draft = trip_draft(&bytes(json!({
            "title": "Blink",
            "started_at": "2026-05-01T05:00:00Z",
            "ended_at": "2026-05-01T07:00:00+02:00",
            "latitude": 47.5,
            "longitude": 10.9
        })))
        .expect("valid draft");
        assert_eq!(draft.ended_at, Some(draft.started_at));
    }

    #[rstest]
    fn patch_with_both_ends_is_checked_inline() {
        let error = trip_patch(&bytes(json!({
            "started_at": "2026-05-02T05:00:00Z",
            "ended_at": "2026-05-01T05:00:00Z"
        })))
        .expect_err("inverted window");
        assert_eq!(error.message(), "ended_at: must not be earlier than started_at");
    }

    #[rstest]
    fn patch_clearing_coordinates_needs_both_keys() {
        let patch = trip_patch(&bytes(json!({"latitude": null, "longitude": null})))
            .expect("valid patch");
        assert_eq!(patch.latitude, Some(None));
        assert_eq!(patch.longitude, Some(None));

        let error = trip_patch(&bytes(json!({"latitude": null}))).expect_err("half pair");
        assert_eq!(
            error.details(),
            Some(&json!({"field": "longitude", "reason": "is required when latitude is set"}))
        );
    }

    #[rstest]
    #[case(json!({"latitude": 48.0, "longitude": null}), "longitude", "is required when latitude is set")]
    #[case(json!({"latitude": null, "longitude": 10.9}), "latitude", "is required when longitude is set")]
    fn patch_cannot_clear_half_a_pair(
        #[case] body: serde_json::Value,
        #[case] field: &str,
        #[case] reason: &str,
    ) {
        let error = trip_patch(&bytes(body)).expect_err("half cleared pair");
        assert_eq!(error.details(), Some(&json!({"field": field, "reason": reason})));
    }
}
