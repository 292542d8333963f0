//! Catch API handlers.
//!
//! ```text
//! GET    /api/v1/trips/{trip_id}/catches
//! POST   /api/v1/trips/{trip_id}/catches {"species":"Pike","caught_at":"2026-05-01T06:10:00Z"}
//! PATCH  /api/v1/catches/{id} {"released":true}
//! DELETE /api/v1/catches/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde_json::Value;

use crate::domain::catches::{MEASUREMENT_MAX, SPECIES_MAX};
use crate::domain::{CatchDraft, CatchPatch, Error, NOTES_MAX};
use crate::inbound::http::ApiResult;
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::response;
use crate::inbound::http::schemas::{CatchEnvelope, CatchInput, CatchList, ErrorEnvelope};
use crate::inbound::http::validation::{BodyReader, path_uuid, rules};

fn measurement(value: &Value) -> Result<f64, String> {
    rules::positive_up_to(value, MEASUREMENT_MAX)
}

/// Create schema.
pub(crate) fn catch_draft(bytes: &[u8]) -> Result<CatchDraft, Error> {
    let mut body = BodyReader::parse(bytes)?;
    let draft = CatchDraft {
        species: body.required("species", rules::text::<SPECIES_MAX>),
        length_cm: body.optional("length_cm", measurement),
        weight_kg: body.optional("weight_kg", measurement),
        caught_at: body.required("caught_at", rules::timestamp),
        rod_id: body.optional("rod_id", rules::uuid),
        released: body.or_default("released", rules::boolean),
        notes: body.optional("notes", rules::text::<NOTES_MAX>),
    };
    Ok(body.finish(draft)?)
}

/// Update schema.
pub(crate) fn catch_patch(bytes: &[u8]) -> Result<CatchPatch, Error> {
    let mut body = BodyReader::parse(bytes)?;
    let patch = CatchPatch {
        species: body.patch("species", rules::text::<SPECIES_MAX>),
        length_cm: body.patch_nullable("length_cm", measurement),
        weight_kg: body.patch_nullable("weight_kg", measurement),
        caught_at: body.patch("caught_at", rules::timestamp),
        rod_id: body.patch_nullable("rod_id", rules::uuid),
        released: body.patch("released", rules::boolean),
        notes: body.patch_nullable("notes", rules::text::<NOTES_MAX>),
    };
    body.require_change(patch.is_empty());
    Ok(body.finish(patch)?)
}

/// Every catch of a trip, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/trips/{trip_id}/catches",
    params(("trip_id" = String, Path, description = "Trip id")),
    responses(
        (status = 200, description = "Catches of the trip", body = CatchList),
        (status = 400, description = "Malformed trip id", body = ErrorEnvelope),
        (status = 404, description = "Trip not found", body = ErrorEnvelope)
    ),
    tags = ["catches"],
    operation_id = "listCatches"
)]
#[get("/trips/{trip_id}/catches")]
pub async fn list_catches(
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let trip_id = path_uuid("trip_id", &path)?;
    let catches = ctx.state.catches.list_for_trip(&ctx.identity, trip_id).await?;
    Ok(response::ok(catches))
}

/// Record a catch on a trip.
#[utoipa::path(
    post,
    path = "/api/v1/trips/{trip_id}/catches",
    params(("trip_id" = String, Path, description = "Trip id")),
    request_body = CatchInput,
    responses(
        (status = 201, description = "Catch created", body = CatchEnvelope),
        (status = 400, description = "Invalid body or unknown rod", body = ErrorEnvelope),
        (status = 404, description = "Trip not found", body = ErrorEnvelope)
    ),
    tags = ["catches"],
    operation_id = "createCatch"
)]
#[post("/trips/{trip_id}/catches")]
pub async fn create_catch(
    ctx: RequestContext,
    path: web::Path<String>,
    payload: web::Bytes,
) -> ApiResult<HttpResponse> {
    let trip_id = path_uuid("trip_id", &path)?;
    let draft = catch_draft(&payload)?;
    let catch = ctx
        .state
        .catches
        .create(&ctx.identity, trip_id, &draft)
        .await?;
    Ok(response::created(catch))
}

/// Change fields of a catch; `null` clears optional fields.
#[utoipa::path(
    patch,
    path = "/api/v1/catches/{id}",
    params(("id" = String, Path, description = "Catch id")),
    request_body = CatchInput,
    responses(
        (status = 200, description = "Updated catch", body = CatchEnvelope),
        (status = 400, description = "Invalid body", body = ErrorEnvelope),
        (status = 404, description = "Not found", body = ErrorEnvelope)
    ),
    tags = ["catches"],
    operation_id = "updateCatch"
)]
#[patch("/catches/{id}")]
pub async fn update_catch(
    ctx: RequestContext,
    path: web::Path<String>,
    payload: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = path_uuid("id", &path)?;
    let patch = catch_patch(&payload)?;
    let catch = ctx.state.catches.update(&ctx.identity, id, &patch).await?;
    Ok(response::ok(catch))
}

/// Remove a catch.
#[utoipa::path(
    delete,
    path = "/api/v1/catches/{id}",
    params(("id" = String, Path, description = "Catch id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorEnvelope)
    ),
    tags = ["catches"],
    operation_id = "deleteCatch"
)]
#[delete("/catches/{id}")]
pub async fn delete_catch(
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path_uuid("id", &path)?;
    ctx.state.catches.delete(&ctx.identity, id).await?;
    Ok(response::no_content())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn bytes(value: Value) -> Vec<u8> {
        value.to_string().into_bytes()
    }

    #[rstest]
    fn released_defaults_to_false() {
        let draft = catch_draft(&bytes(json!({
            "species": "  Perch ",
            "caught_at": "2026-05-01T06:10:00Z"
        })))
        .expect("valid draft");
        assert_eq!(draft.species, "Perch");
        assert!(!draft.released);
        assert_eq!(draft.rod_id, None);
    }

    #[rstest]
    #[case(json!({"caught_at": "2026-05-01T06:10:00Z"}), "species", "is required")]
    #[case(
        json!({"species": "Pike", "caught_at": "2026-05-01T06:10:00Z", "length_cm": 0}),
        "length_cm",
        "must be greater than 0 and at most 1000"
    )]
    #[case(
        json!({"species": "Pike", "caught_at": "2026-05-01T06:10:00Z", "weight_kg": "heavy"}),
        "weight_kg",
        "must be a number"
    )]
    #[case(
        json!({"species": "Pike", "caught_at": "2026-05-01T06:10:00Z", "rod_id": "rod-1"}),
        "rod_id",
        "must be a valid UUID"
    )]
    #[case(
        json!({"species": "Pike", "caught_at": "2026-05-01T06:10:00Z", "released": "yes"}),
        "released",
        "must be a boolean"
    )]
    fn draft_rejections(#[case] body: Value, #[case] field: &str, #[case] reason: &str) {
        let error = catch_draft(&bytes(body)).expect_err("invalid draft");
        assert_eq!(
            error.details(),
            Some(&json!({"field": field, "reason": reason}))
        );
    }

    #[rstest]
    fn patch_can_unlink_rod() {
        let patch = catch_patch(&bytes(json!({"rod_id": null}))).expect("valid patch");
        assert_eq!(patch.rod_id, Some(None));
        assert_eq!(patch.linked_rod(), None);
    }

    #[rstest]
    fn empty_patch_is_rejected() {
        let error = catch_patch(b"{}").expect_err("empty patch");
        assert_eq!(error.message(), "body: must contain at least one field");
    }
}
