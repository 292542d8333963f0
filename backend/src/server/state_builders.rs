//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use logbook::domain::ports::{
    AuthGateway, CatchRepository, FixtureAuthGateway, RodRepository, TripRepository,
    WeatherSnapshotRepository,
};
use logbook::inbound::http::state::{HttpState, HttpStatePorts};
use logbook::outbound::memory::MemoryStore;
use logbook::outbound::open_meteo::OpenMeteoSource;
use logbook::outbound::supabase::{SupabaseAuthGateway, SupabaseClient, SupabaseStore};
use logbook::settings::StorageBackend;

use super::{ServerConfig, StartupError};

/// Repository and gateway implementations for one storage backend.
struct StoragePorts {
    auth: Arc<dyn AuthGateway>,
    rods: Arc<dyn RodRepository>,
    trips: Arc<dyn TripRepository>,
    catches: Arc<dyn CatchRepository>,
    snapshots: Arc<dyn WeatherSnapshotRepository>,
}

impl StoragePorts {
    fn shared<S>(store: Arc<S>, auth: Arc<dyn AuthGateway>) -> Self
    where
        S: RodRepository + TripRepository + CatchRepository + WeatherSnapshotRepository + 'static,
    {
        Self {
            auth,
            rods: store.clone(),
            trips: store.clone(),
            catches: store.clone(),
            snapshots: store,
        }
    }
}

fn storage_ports(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> Result<StoragePorts, StartupError> {
    match &config.storage {
        StorageBackend::Memory => {
            warn!("Supabase not configured; using in-memory store and fixture login");
            Ok(StoragePorts::shared(
                Arc::new(MemoryStore::new(clock)),
                Arc::new(FixtureAuthGateway),
            ))
        }
        StorageBackend::Supabase { url, anon_key } => {
            info!(url = %url, "using Supabase storage");
            let client =
                SupabaseClient::new(url.clone(), anon_key.as_str(), config.http_timeout, clock)?;
            Ok(StoragePorts::shared(
                Arc::new(SupabaseStore::new(client.clone())),
                Arc::new(SupabaseAuthGateway::new(client)),
            ))
        }
    }
}

/// Build the services handlers call.
///
/// # Errors
/// [`StartupError::HttpClient`] when an outbound client cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> Result<HttpState, StartupError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let StoragePorts {
        auth,
        rods,
        trips,
        catches,
        snapshots,
    } = storage_ports(config, clock.clone())?;
    let weather_source = OpenMeteoSource::new(config.open_meteo_url.clone(), config.http_timeout)?;
    Ok(HttpState::new(HttpStatePorts {
        auth,
        rods,
        trips,
        catches,
        snapshots,
        weather_source: Arc::new(weather_source),
        clock,
    }))
}
