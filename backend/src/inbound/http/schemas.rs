//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and exist only for documentation.

#![expect(
    dead_code,
    reason = "Schema wrappers are read only by utoipa's derive output"
)]

use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "validation_error")]
    ValidationError,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The resource does not exist or is not visible to the caller.
    #[schema(rename = "not_found")]
    NotFound,
    /// A uniqueness rule was violated.
    #[schema(rename = "conflict")]
    Conflict,
    /// Too many requests; see `details.retry_after_seconds`.
    #[schema(rename = "rate_limited")]
    RateLimited,
    /// An upstream service failed.
    #[schema(rename = "bad_gateway")]
    BadGateway,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal")]
    Internal,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
pub struct ErrorSchema {
    #[schema(example = "validation_error")]
    code: ErrorCodeSchema,
    #[schema(example = "limit: must be between 1 and 100")]
    message: String,
    /// `{field, reason}` for validation failures.
    details: Option<Value>,
}

/// Body of every error response. The `trace-id` header carries the trace id.
#[derive(ToSchema)]
pub struct ErrorEnvelope {
    error: ErrorSchema,
}

/// OpenAPI schema for [`crate::domain::Profile`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Profile)]
pub struct ProfileSchema {
    #[schema(value_type = String, format = Uuid)]
    user_id: String,
    #[schema(example = "angler@example.com")]
    email: String,
}

#[derive(ToSchema)]
pub struct ProfileEnvelope {
    data: ProfileSchema,
}

/// OpenAPI schema for [`crate::domain::Rod`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Rod)]
pub struct RodSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(value_type = String, format = Uuid)]
    user_id: String,
    #[schema(example = "Feeder 3.6")]
    name: String,
    brand: Option<String>,
    model: Option<String>,
    #[schema(example = 3.6)]
    length_m: Option<f64>,
    power: Option<String>,
    action: Option<String>,
    notes: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
    #[schema(value_type = Option<String>, format = DateTime)]
    deleted_at: Option<String>,
}

/// Rod create and update body. On update every field is optional and
/// `null` clears a nullable field.
#[derive(ToSchema)]
pub struct RodInput {
    name: String,
    brand: Option<String>,
    model: Option<String>,
    /// Metres, in `(0, 10]`.
    length_m: Option<f64>,
    power: Option<String>,
    action: Option<String>,
    notes: Option<String>,
}

#[derive(ToSchema)]
pub struct RodEnvelope {
    data: RodSchema,
}

#[derive(ToSchema)]
pub struct RodPage {
    data: Vec<RodSchema>,
    #[schema(rename = "nextCursor")]
    next_cursor: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Trip`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Trip)]
pub struct TripSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(value_type = String, format = Uuid)]
    user_id: String,
    #[schema(example = "Dawn on the Lech")]
    title: String,
    location_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[schema(value_type = String, format = DateTime)]
    started_at: String,
    #[schema(value_type = Option<String>, format = DateTime)]
    ended_at: Option<String>,
    notes: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
    #[schema(value_type = Option<String>, format = DateTime)]
    deleted_at: Option<String>,
}

/// Trip create and update body. `ended_at` must not precede `started_at`;
/// latitude and longitude travel together.
#[derive(ToSchema)]
pub struct TripInput {
    title: String,
    location_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[schema(value_type = String, format = DateTime)]
    started_at: String,
    #[schema(value_type = Option<String>, format = DateTime)]
    ended_at: Option<String>,
    notes: Option<String>,
}

#[derive(ToSchema)]
pub struct TripEnvelope {
    data: TripSchema,
}

#[derive(ToSchema)]
pub struct TripPage {
    data: Vec<TripSchema>,
    #[schema(rename = "nextCursor")]
    next_cursor: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Catch`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Catch)]
pub struct CatchSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(value_type = String, format = Uuid)]
    user_id: String,
    #[schema(value_type = String, format = Uuid)]
    trip_id: String,
    #[schema(example = "Pike")]
    species: String,
    length_cm: Option<f64>,
    weight_kg: Option<f64>,
    #[schema(value_type = String, format = DateTime)]
    caught_at: String,
    #[schema(value_type = Option<String>, format = Uuid)]
    rod_id: Option<String>,
    released: bool,
    notes: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// Catch create and update body. `released` defaults to `false`.
#[derive(ToSchema)]
pub struct CatchInput {
    species: String,
    length_cm: Option<f64>,
    weight_kg: Option<f64>,
    #[schema(value_type = String, format = DateTime)]
    caught_at: String,
    #[schema(value_type = Option<String>, format = Uuid)]
    rod_id: Option<String>,
    released: Option<bool>,
    notes: Option<String>,
}

#[derive(ToSchema)]
pub struct CatchEnvelope {
    data: CatchSchema,
}

#[derive(ToSchema)]
pub struct CatchList {
    data: Vec<CatchSchema>,
}

/// OpenAPI schema for [`crate::domain::WeatherSnapshot`].
#[derive(ToSchema)]
#[schema(as = crate::domain::WeatherSnapshot)]
pub struct WeatherSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(value_type = String, format = Uuid)]
    user_id: String,
    #[schema(value_type = String, format = Uuid)]
    trip_id: String,
    #[schema(example = "open-meteo")]
    source: String,
    #[schema(value_type = String, format = DateTime)]
    observed_at: String,
    temperature_c: Option<f64>,
    wind_speed_kmh: Option<f64>,
    wind_direction_deg: Option<f64>,
    pressure_hpa: Option<f64>,
    precipitation_mm: Option<f64>,
    cloud_cover_pct: Option<f64>,
    description: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// Manually entered observation.
#[derive(ToSchema)]
pub struct WeatherInput {
    #[schema(value_type = String, format = DateTime)]
    observed_at: String,
    temperature_c: Option<f64>,
    wind_speed_kmh: Option<f64>,
    /// Degrees in `[0, 360]`.
    wind_direction_deg: Option<f64>,
    pressure_hpa: Option<f64>,
    precipitation_mm: Option<f64>,
    /// Percent in `[0, 100]`.
    cloud_cover_pct: Option<f64>,
    description: Option<String>,
}

#[derive(ToSchema)]
pub struct WeatherEnvelope {
    data: WeatherSchema,
}

#[derive(ToSchema)]
pub struct WeatherPage {
    data: Vec<WeatherSchema>,
    #[schema(rename = "nextCursor")]
    next_cursor: Option<String>,
}

/// Query parameters shared by every list endpoint.
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Case-insensitive search term, at most 200 characters.
    q: Option<String>,
    /// Include soft-deleted rows (`true`, `false`, `1`, `0`).
    include_deleted: Option<String>,
    /// Page size in `[1, 100]`, default 20.
    limit: Option<i64>,
    /// Opaque `nextCursor` from the previous page.
    cursor: Option<String>,
    /// Sort column; allowed values depend on the endpoint.
    sort: Option<String>,
    /// `asc` or `desc`; defaults per column.
    order: Option<String>,
}
