//! Weather snapshot API handlers.
//!
//! ```text
//! GET    /api/v1/trips/{trip_id}/weather?limit=&cursor=&sort=&order=
//! POST   /api/v1/trips/{trip_id}/weather {"observed_at":"2026-05-01T06:00:00Z","temperature_c":11.5}
//! POST   /api/v1/trips/{trip_id}/weather/refresh
//! DELETE /api/v1/weather/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use serde_json::Value;

use crate::domain::weather::DESCRIPTION_MAX;
use crate::domain::{Error, WeatherObservation, WeatherSort};
use crate::inbound::http::ApiResult;
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::response;
use crate::inbound::http::schemas::{
    ErrorEnvelope, WeatherEnvelope, WeatherInput, WeatherPage,
};
use crate::inbound::http::validation::{BodyReader, RawListQuery, list_query, path_uuid, rules};

fn direction(value: &Value) -> Result<f64, String> {
    rules::between(value, 0.0, 360.0)
}

fn percentage(value: &Value) -> Result<f64, String> {
    rules::between(value, 0.0, 100.0)
}

/// Manual observation schema.
pub(crate) fn observation(bytes: &[u8]) -> Result<WeatherObservation, Error> {
    let mut body = BodyReader::parse(bytes)?;
    let observation = WeatherObservation {
        observed_at: body.required("observed_at", rules::timestamp),
        temperature_c: body.optional("temperature_c", rules::any_number),
        wind_speed_kmh: body.optional("wind_speed_kmh", rules::non_negative),
        wind_direction_deg: body.optional("wind_direction_deg", direction),
        pressure_hpa: body.optional("pressure_hpa", rules::positive),
        precipitation_mm: body.optional("precipitation_mm", rules::non_negative),
        cloud_cover_pct: body.optional("cloud_cover_pct", percentage),
        description: body.optional("description", rules::text::<DESCRIPTION_MAX>),
    };
    Ok(body.finish(observation)?)
}

/// One page of snapshots recorded for a trip.
#[utoipa::path(
    get,
    path = "/api/v1/trips/{trip_id}/weather",
    params(
        ("trip_id" = String, Path, description = "Trip id"),
        crate::inbound::http::schemas::ListParams
    ),
    responses(
        (status = 200, description = "One page of snapshots", body = WeatherPage),
        (status = 400, description = "Invalid query", body = ErrorEnvelope),
        (status = 404, description = "Trip not found", body = ErrorEnvelope)
    ),
    tags = ["weather"],
    operation_id = "listWeather"
)]
#[get("/trips/{trip_id}/weather")]
pub async fn list_weather(
    ctx: RequestContext,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let trip_id = path_uuid("trip_id", &path)?;
    let request =
        list_query::<WeatherSort>(RawListQuery::from_query_string(req.query_string())?)?;
    let page = ctx
        .state
        .weather
        .list(&ctx.identity, trip_id, &request)
        .await?;
    Ok(response::page(&req, page))
}

/// Record an observation entered by hand.
#[utoipa::path(
    post,
    path = "/api/v1/trips/{trip_id}/weather",
    params(("trip_id" = String, Path, description = "Trip id")),
    request_body = WeatherInput,
    responses(
        (status = 201, description = "Snapshot created", body = WeatherEnvelope),
        (status = 400, description = "Invalid body", body = ErrorEnvelope),
        (status = 404, description = "Trip not found", body = ErrorEnvelope)
    ),
    tags = ["weather"],
    operation_id = "createWeather"
)]
#[post("/trips/{trip_id}/weather")]
pub async fn create_weather(
    ctx: RequestContext,
    path: web::Path<String>,
    payload: web::Bytes,
) -> ApiResult<HttpResponse> {
    let trip_id = path_uuid("trip_id", &path)?;
    let observation = observation(&payload)?;
    let snapshot = ctx
        .state
        .weather
        .create(&ctx.identity, trip_id, observation)
        .await?;
    Ok(response::created(snapshot))
}

/// Fetch current conditions for the trip's coordinates.
#[utoipa::path(
    post,
    path = "/api/v1/trips/{trip_id}/weather/refresh",
    params(("trip_id" = String, Path, description = "Trip id")),
    responses(
        (status = 201, description = "Snapshot fetched and stored", body = WeatherEnvelope),
        (status = 400, description = "Trip has no coordinates", body = ErrorEnvelope),
        (status = 404, description = "Trip not found", body = ErrorEnvelope),
        (status = 429, description = "Refreshed too recently or provider quota exhausted", body = ErrorEnvelope),
        (status = 502, description = "Weather provider failed", body = ErrorEnvelope)
    ),
    tags = ["weather"],
    operation_id = "refreshWeather"
)]
#[post("/trips/{trip_id}/weather/refresh")]
pub async fn refresh_weather(
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let trip_id = path_uuid("trip_id", &path)?;
    let snapshot = ctx.state.weather.refresh(&ctx.identity, trip_id).await?;
    Ok(response::created(snapshot))
}

/// Remove a snapshot.
#[utoipa::path(
    delete,
    path = "/api/v1/weather/{id}",
    params(("id" = String, Path, description = "Snapshot id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorEnvelope)
    ),
    tags = ["weather"],
    operation_id = "deleteWeather"
)]
#[delete("/weather/{id}")]
pub async fn delete_weather(
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path_uuid("id", &path)?;
    ctx.state.weather.delete(&ctx.identity, id).await?;
    Ok(response::no_content())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("wind_direction_deg", json!(361), "must be between 0 and 360")]
    #[case("cloud_cover_pct", json!(-1), "must be between 0 and 100")]
    #[case("wind_speed_kmh", json!(-0.5), "must not be negative")]
    #[case("pressure_hpa", json!(0), "must be greater than 0")]
    #[case("precipitation_mm", json!("wet"), "must be a number")]
    #[case("description", json!(""), "must not be empty")]
    fn observation_rejections(#[case] field: &str, #[case] value: Value, #[case] reason: &str) {
        let mut body = json!({"observed_at": "2026-05-01T06:00:00Z"});
        body[field] = value;
        let error = observation(body.to_string().as_bytes()).expect_err("invalid observation");
        assert_eq!(
            error.details(),
            Some(&json!({"field": field, "reason": reason}))
        );
    }

    #[rstest]
    fn negative_temperature_is_accepted() {
        let parsed = observation(
            json!({
                "observed_at": "2026-01-10T07:00:00+01:00",
                "temperature_c": -12.5,
                "wind_direction_deg": 360
            })
            .to_string()
            .as_bytes(),
        )
        .expect("valid observation");
        assert_eq!(parsed.temperature_c, Some(-12.5));
        assert_eq!(parsed.observed_at.to_rfc3339(), "2026-01-10T06:00:00+00:00");
    }

    #[rstest]
    fn observed_at_is_required() {
        let error = observation(b"{\"temperature_c\": 3}").expect_err("missing timestamp");
        assert_eq!(error.message(), "observed_at: is required");
    }
}
