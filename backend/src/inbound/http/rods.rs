//! Rod API handlers.
//!
//! ```text
//! GET    /api/v1/rods?q=&include_deleted=&limit=&cursor=&sort=&order=
//! POST   /api/v1/rods {"name":"Feeder 3.6","length_m":3.6}
//! GET    /api/v1/rods/{id}
//! PATCH  /api/v1/rods/{id} {"notes":null}
//! DELETE /api/v1/rods/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use serde_json::Value;

use crate::domain::rods::{ROD_LABEL_MAX, ROD_LENGTH_MAX_M, ROD_NAME_MAX};
use crate::domain::{Error, NOTES_MAX, RodDraft, RodPatch, RodSort};
use crate::inbound::http::ApiResult;
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::response;
use crate::inbound::http::schemas::{ErrorEnvelope, RodEnvelope, RodInput, RodPage};
use crate::inbound::http::validation::{BodyReader, RawListQuery, list_query, path_uuid, rules};

fn length_m(value: &Value) -> Result<f64, String> {
    rules::positive_up_to(value, ROD_LENGTH_MAX_M)
}

/// Create schema.
pub(crate) fn rod_draft(bytes: &[u8]) -> Result<RodDraft, Error> {
    let mut body = BodyReader::parse(bytes)?;
    let draft = RodDraft {
        name: body.required("name", rules::text::<ROD_NAME_MAX>),
        brand: body.optional("brand", rules::text::<ROD_LABEL_MAX>),
        model: body.optional("model", rules::text::<ROD_LABEL_MAX>),
        length_m: body.optional("length_m", length_m),
        power: body.optional("power", rules::text::<ROD_LABEL_MAX>),
        action: body.optional("action", rules::text::<ROD_LABEL_MAX>),
        notes: body.optional("notes", rules::text::<NOTES_MAX>),
    };
    Ok(body.finish(draft)?)
}

/// Update schema.
pub(crate) fn rod_patch(bytes: &[u8]) -> Result<RodPatch, Error> {
    let mut body = BodyReader::parse(bytes)?;
    let patch = RodPatch {
        name: body.patch("name", rules::text::<ROD_NAME_MAX>),
        brand: body.patch_nullable("brand", rules::text::<ROD_LABEL_MAX>),
        model: body.patch_nullable("model", rules::text::<ROD_LABEL_MAX>),
        length_m: body.patch_nullable("length_m", length_m),
        power: body.patch_nullable("power", rules::text::<ROD_LABEL_MAX>),
        action: body.patch_nullable("action", rules::text::<ROD_LABEL_MAX>),
        notes: body.patch_nullable("notes", rules::text::<NOTES_MAX>),
    };
    body.require_change(patch.is_empty());
    Ok(body.finish(patch)?)
}

/// List the caller's rods.
#[utoipa::path(
    get,
    path = "/api/v1/rods",
    params(crate::inbound::http::schemas::ListParams),
    responses(
        (status = 200, description = "One page of rods", body = RodPage),
        (status = 400, description = "Invalid query", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope)
    ),
    tags = ["rods"],
    operation_id = "listRods"
)]
#[get("/rods")]
pub async fn list_rods(ctx: RequestContext, req: HttpRequest) -> ApiResult<HttpResponse> {
    let request = list_query::<RodSort>(RawListQuery::from_query_string(req.query_string())?)?;
    let page = ctx.state.rods.list(&ctx.identity, &request).await?;
    Ok(response::page(&req, page))
}

/// Record a rod.
#[utoipa::path(
    post,
    path = "/api/v1/rods",
    request_body = RodInput,
    responses(
        (status = 201, description = "Rod created", body = RodEnvelope),
        (status = 400, description = "Invalid body", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 409, description = "Name already in use", body = ErrorEnvelope)
    ),
    tags = ["rods"],
    operation_id = "createRod"
)]
#[post("/rods")]
pub async fn create_rod(ctx: RequestContext, payload: web::Bytes) -> ApiResult<HttpResponse> {
    let draft = rod_draft(&payload)?;
    let rod = ctx.state.rods.create(&ctx.identity, &draft).await?;
    Ok(response::created(rod))
}

/// Fetch one rod.
#[utoipa::path(
    get,
    path = "/api/v1/rods/{id}",
    params(("id" = String, Path, description = "Rod id")),
    responses(
        (status = 200, description = "Rod", body = RodEnvelope),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "Not found", body = ErrorEnvelope)
    ),
    tags = ["rods"],
    operation_id = "getRod"
)]
#[get("/rods/{id}")]
pub async fn get_rod(ctx: RequestContext, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = path_uuid("id", &path)?;
    let rod = ctx.state.rods.get(&ctx.identity, id).await?;
    Ok(response::ok(rod))
}

/// Change fields of a rod; `null` clears optional fields.
#[utoipa::path(
    patch,
    path = "/api/v1/rods/{id}",
    params(("id" = String, Path, description = "Rod id")),
    request_body = RodInput,
    responses(
        (status = 200, description = "Updated rod", body = RodEnvelope),
        (status = 400, description = "Invalid body", body = ErrorEnvelope),
        (status = 404, description = "Not found", body = ErrorEnvelope),
        (status = 409, description = "Name already in use", body = ErrorEnvelope)
    ),
    tags = ["rods"],
    operation_id = "updateRod"
)]
#[patch("/rods/{id}")]
pub async fn update_rod(
    ctx: RequestContext,
    path: web::Path<String>,
    payload: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = path_uuid("id", &path)?;
    let patch = rod_patch(&payload)?;
    let rod = ctx.state.rods.update(&ctx.identity, id, &patch).await?;
    Ok(response::ok(rod))
}

/// Soft-delete a rod.
#[utoipa::path(
    delete,
    path = "/api/v1/rods/{id}",
    params(("id" = String, Path, description = "Rod id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorEnvelope)
    ),
    tags = ["rods"],
    operation_id = "deleteRod"
)]
#[delete("/rods/{id}")]
pub async fn delete_rod(ctx: RequestContext, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = path_uuid("id", &path)?;
    ctx.state.rods.delete(&ctx.identity, id).await?;
    Ok(response::no_content())
}
