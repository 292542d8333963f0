//! HTTP inbound adapter exposing the logbook REST API.
//!
//! Handlers parse input with the schemas in [`validation`], call a domain
//! service through [`context::RequestContext`] and shape the outcome with
//! [`response`] or the [`error`] envelope.

pub mod catches;
pub mod context;
pub mod error;
pub mod health;
pub mod response;
pub mod rods;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod trips;
pub mod users;
pub mod validation;
pub mod weather;

use actix_web::{HttpResponse, web};

pub use error::ApiResult;

use crate::domain::Error;

/// Register every `/api/v1` handler on `cfg`.
///
/// The caller mounts the result under `/api/v1` behind the session
/// middleware.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::logout)
        .service(users::me)
        .service(rods::list_rods)
        .service(rods::create_rod)
        .service(rods::get_rod)
        .service(rods::update_rod)
        .service(rods::delete_rod)
        .service(trips::list_trips)
        .service(trips::create_trip)
        .service(trips::get_trip)
        .service(trips::update_trip)
        .service(trips::delete_trip)
        .service(catches::list_catches)
        .service(catches::create_catch)
        .service(catches::update_catch)
        .service(catches::delete_catch)
        .service(weather::list_weather)
        .service(weather::create_weather)
        .service(weather::refresh_weather)
        .service(weather::delete_weather);
}

/// Fallback for unmatched `/api/v1` paths.
pub async fn unknown_route() -> ApiResult<HttpResponse> {
    Err(Error::not_found("no such endpoint"))
}
