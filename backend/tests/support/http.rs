//! Shared harness for HTTP integration tests.
//!
//! Builds the `/api/v1` router over a fresh in-memory store, the fixture
//! auth gateway and a scripted weather source, with a clock tests advance.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{Method, StatusCode, header::HeaderMap};
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use logbook::Trace;
use mockable::Clock;
use logbook::domain::WeatherObservation;
use logbook::domain::ports::{
    FIXTURE_EMAIL, FIXTURE_PASSWORD, FixtureAuthGateway, WeatherSource, WeatherSourceError,
};
use logbook::inbound::http::state::{HttpState, HttpStatePorts};
use logbook::inbound::http::{configure_api, unknown_route};
use logbook::outbound::memory::MemoryStore;
use logbook::test_support::MutableClock;
use serde_json::Value;

/// What the scripted weather provider answers.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Upstream {
    Calm,
    RateLimited,
    Down,
}

pub(crate) struct ScriptedWeather {
    upstream: Upstream,
    clock: Arc<MutableClock>,
}

#[async_trait]
impl WeatherSource for ScriptedWeather {
    async fn current_conditions(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<WeatherObservation, WeatherSourceError> {
        match self.upstream {
            Upstream::Calm => Ok(calm(self.clock.utc())),
            Upstream::RateLimited => Err(WeatherSourceError::rate_limited("status 429")),
            Upstream::Down => Err(WeatherSourceError::rejected("status 503")),
        }
    }
}

pub(crate) fn calm(observed_at: DateTime<Utc>) -> WeatherObservation {
    WeatherObservation {
        observed_at,
        temperature_c: Some(14.0),
        wind_speed_kmh: Some(6.5),
        wind_direction_deg: Some(200.0),
        pressure_hpa: Some(1016.0),
        precipitation_mm: Some(0.0),
        cloud_cover_pct: Some(25.0),
        description: Some("Mainly clear".into()),
    }
}

pub(crate) fn start_of_season() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-05-01T04:00:00Z")
        .expect("timestamp")
        .with_timezone(&Utc)
}

/// Router wired like the server's `/api/v1` scope.
pub(crate) fn test_app(
    clock: Arc<MutableClock>,
    upstream: Upstream,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let store = Arc::new(MemoryStore::new(clock.clone()));
    let state = HttpState::new(HttpStatePorts {
        auth: Arc::new(FixtureAuthGateway),
        rods: store.clone(),
        trips: store.clone(),
        catches: store.clone(),
        snapshots: store,
        weather_source: Arc::new(ScriptedWeather {
            upstream,
            clock: clock.clone(),
        }),
        clock,
    });
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session)
                .configure(configure_api)
                .default_service(web::to(unknown_route)),
        )
}

/// A captured response.
pub(crate) struct Reply {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Value,
}

impl Reply {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub(crate) fn error_details(&self) -> &Value {
        &self.body["error"]["details"]
    }
}

pub(crate) async fn send<S>(
    app: &S,
    method: Method,
    uri: &str,
    cookie: Option<&Cookie<'static>>,
    payload: Option<Value>,
) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = actix_test::TestRequest::default().method(method).uri(uri);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    if let Some(payload) = payload {
        request = request.set_json(payload);
    }
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    Reply {
        status,
        headers,
        body,
    }
}

/// Sign in with the fixture credentials and return the session cookie.
pub(crate) async fn login<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(serde_json::json!({
            "email": FIXTURE_EMAIL,
            "password": FIXTURE_PASSWORD
        }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK, "fixture login");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
