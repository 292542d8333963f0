//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how services reach storage, the auth service and
//! the weather provider. Each exposes a port-specific error enum so adapters
//! map their failures into predictable variants.

mod macros;

pub(crate) use macros::define_port_error;

mod auth_gateway;
mod catch_repository;
mod repository_error;
mod rod_repository;
mod trip_repository;
mod weather_snapshot_repository;
mod weather_source;

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::{
    AuthGateway, AuthGatewayError, FIXTURE_EMAIL, FIXTURE_PASSWORD, FIXTURE_USER_ID,
    FixtureAuthGateway,
};
#[cfg(test)]
pub use catch_repository::MockCatchRepository;
pub use catch_repository::CatchRepository;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use rod_repository::MockRodRepository;
pub use rod_repository::RodRepository;
#[cfg(test)]
pub use trip_repository::MockTripRepository;
pub use trip_repository::TripRepository;
#[cfg(test)]
pub use weather_snapshot_repository::MockWeatherSnapshotRepository;
pub use weather_snapshot_repository::WeatherSnapshotRepository;
#[cfg(test)]
pub use weather_source::MockWeatherSource;
pub use weather_source::{FixtureWeatherSource, WeatherSource, WeatherSourceError};
