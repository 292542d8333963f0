//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AuthGateway, CatchRepository, RodRepository, TripRepository, WeatherSnapshotRepository,
    WeatherSource,
};
use crate::domain::{CatchService, RodService, SessionService, TripService, WeatherService};

/// Parameter object bundling every port implementation the handlers need.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub auth: Arc<dyn AuthGateway>,
    pub rods: Arc<dyn RodRepository>,
    pub trips: Arc<dyn TripRepository>,
    pub catches: Arc<dyn CatchRepository>,
    pub snapshots: Arc<dyn WeatherSnapshotRepository>,
    pub weather_source: Arc<dyn WeatherSource>,
    pub clock: Arc<dyn Clock>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sessions: SessionService,
    pub rods: RodService,
    pub trips: TripService,
    pub catches: CatchService,
    pub weather: WeatherService,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct the services over a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use chrono::Utc;
    /// use logbook::domain::WeatherObservation;
    /// use logbook::domain::ports::{FixtureAuthGateway, FixtureWeatherSource};
    /// use logbook::inbound::http::state::{HttpState, HttpStatePorts};
    /// use logbook::outbound::memory::MemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let calm = WeatherObservation {
    ///     observed_at: Utc::now(),
    ///     temperature_c: Some(12.0),
    ///     wind_speed_kmh: Some(3.0),
    ///     wind_direction_deg: None,
    ///     pressure_hpa: None,
    ///     precipitation_mm: None,
    ///     cloud_cover_pct: None,
    ///     description: None,
    /// };
    /// let clock = Arc::new(DefaultClock);
    /// let store = Arc::new(MemoryStore::new(clock.clone()));
    /// let state = HttpState::new(HttpStatePorts {
    ///     auth: Arc::new(FixtureAuthGateway),
    ///     rods: store.clone(),
    ///     trips: store.clone(),
    ///     catches: store.clone(),
    ///     snapshots: store,
    ///     weather_source: Arc::new(FixtureWeatherSource::new(calm)),
    ///     clock,
    /// });
    /// let _rods = state.rods.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            auth,
            rods,
            trips,
            catches,
            snapshots,
            weather_source,
            clock,
        } = ports;
        Self {
            sessions: SessionService::new(auth),
            rods: RodService::new(rods.clone()),
            trips: TripService::new(trips.clone()),
            catches: CatchService::new(trips.clone(), rods, catches),
            weather: WeatherService::new(trips, snapshots, weather_source, clock),
        }
    }
}
