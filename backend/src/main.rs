//! Logbook server entry-point.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use logbook::inbound::http::health::HealthState;
use logbook::inbound::http::session_config::BuildMode;
use logbook::inbound::http::session_config::fingerprint::key_fingerprint;
use logbook::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|err| std::io::Error::other(format!("invalid configuration: {err}")))?;
    let config = ServerConfig::from_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        bind_addr = %config.bind_addr(),
        session_key = %key_fingerprint(&config.key),
        "starting logbook server"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config).map_err(std::io::Error::other)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
