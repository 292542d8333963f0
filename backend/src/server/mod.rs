//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, StartupError};

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use state_builders::build_http_state;

use logbook::Trace;
#[cfg(debug_assertions)]
use logbook::doc::ApiDoc;
use logbook::inbound::http::health::{HealthState, live, ready};
use logbook::inbound::http::state::HttpState;
use logbook::inbound::http::{configure_api, unknown_route};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .configure(configure_api)
        .default_service(web::to(unknown_route));

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server and mark it ready once bound.
///
/// # Errors
/// Fails when an outbound client cannot be built or the socket cannot be
/// bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> Result<Server, ServerError> {
    let http_state = web::Data::new(build_http_state(&config)?);
    let server_health_state = health_state.clone();
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Failures while creating the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("failed to bind: {0}")]
    Bind(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use logbook::inbound::http::session_config::BuildMode;
    use logbook::settings::AppSettings;
    use rstest::{fixture, rstest};

    #[fixture]
    fn deps() -> AppDependencies {
        let settings = AppSettings {
            session_key_file: Some("/nonexistent/logbook/key".into()),
            ..AppSettings::default()
        };
        let config = ServerConfig::from_settings(&settings, BuildMode::Debug).expect("config");
        let http_state = build_http_state(&config).expect("state");
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(http_state),
            key: config.key.clone(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn probes_are_served_at_the_root(deps: AppDependencies) {
        let app = test::init_service(build_app(deps)).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/health/live").to_request())
                .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_api_paths_use_the_error_envelope(deps: AppDependencies) {
        let app = test::init_service(build_app(deps)).await;
        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/reels").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("trace-id"));
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[rstest]
    #[actix_web::test]
    async fn api_routes_require_a_session(deps: AppDependencies) {
        let app = test::init_service(build_app(deps)).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/api/v1/trips").to_request())
                .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
