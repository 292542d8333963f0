//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler of the inbound HTTP adapter, the schema
//! wrappers from [`crate::inbound::http::schemas`] and the session cookie
//! security scheme. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use crate::inbound::http::schemas::{
    CatchEnvelope, CatchInput, CatchList, ErrorCodeSchema, ErrorEnvelope, ErrorSchema,
    ProfileEnvelope, RodEnvelope, RodInput, RodPage, TripEnvelope, TripInput, TripPage,
    WeatherEnvelope, WeatherInput, WeatherPage,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Logbook API",
        description = "Fishing trips, catches, rods and weather snapshots for signed-in anglers.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::me,
        crate::inbound::http::rods::list_rods,
        crate::inbound::http::rods::create_rod,
        crate::inbound::http::rods::get_rod,
        crate::inbound::http::rods::update_rod,
        crate::inbound::http::rods::delete_rod,
        crate::inbound::http::trips::list_trips,
        crate::inbound::http::trips::create_trip,
        crate::inbound::http::trips::get_trip,
        crate::inbound::http::trips::update_trip,
        crate::inbound::http::trips::delete_trip,
        crate::inbound::http::catches::list_catches,
        crate::inbound::http::catches::create_catch,
        crate::inbound::http::catches::update_catch,
        crate::inbound::http::catches::delete_catch,
        crate::inbound::http::weather::list_weather,
        crate::inbound::http::weather::create_weather,
        crate::inbound::http::weather::refresh_weather,
        crate::inbound::http::weather::delete_weather,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ErrorEnvelope,
        ProfileEnvelope,
        RodInput,
        RodEnvelope,
        RodPage,
        TripInput,
        TripEnvelope,
        TripPage,
        CatchInput,
        CatchEnvelope,
        CatchList,
        WeatherInput,
        WeatherEnvelope,
        WeatherPage,
    )),
    tags(
        (name = "session", description = "Sign in and out"),
        (name = "rods", description = "Fishing equipment"),
        (name = "trips", description = "Fishing trips"),
        (name = "catches", description = "Fish recorded on a trip"),
        (name = "weather", description = "Weather snapshots attached to trips"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const ROD_SCHEMA_NAME: &str = "crate.domain.Rod";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => assert!(
                obj.properties.contains_key(field),
                "schema should have field '{field}'"
            ),
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "details")]
    #[case(ROD_SCHEMA_NAME, "length_m")]
    #[case("RodPage", "nextCursor")]
    fn components_carry_wire_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert_object_schema_has_field(schemas.get(schema).expect("schema registered"), field);
    }

    #[rstest]
    #[case("/api/v1/login")]
    #[case("/api/v1/rods/{id}")]
    #[case("/api/v1/trips/{trip_id}/catches")]
    #[case("/api/v1/trips/{trip_id}/weather/refresh")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
