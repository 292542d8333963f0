//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::web;
use chrono::Utc;
use mockable::DefaultClock;

use crate::domain::fixtures::observation;
use crate::domain::ports::{FixtureAuthGateway, FixtureWeatherSource};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::MemoryStore;

/// Session middleware with a fresh key and an insecure cookie named
/// `session`, for plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over an empty in-memory store and the fixture gateway.
pub fn memory_state() -> web::Data<HttpState> {
    let clock = Arc::new(DefaultClock);
    let store = Arc::new(MemoryStore::new(clock.clone()));
    web::Data::new(HttpState::new(HttpStatePorts {
        auth: Arc::new(FixtureAuthGateway),
        rods: store.clone(),
        trips: store.clone(),
        catches: store.clone(),
        snapshots: store,
        weather_source: Arc::new(FixtureWeatherSource::new(observation(Utc::now()))),
        clock,
    }))
}
