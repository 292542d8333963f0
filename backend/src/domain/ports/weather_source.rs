//! Driven port for current weather conditions.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::WeatherObservation;

define_port_error! {
    /// Errors surfaced while calling the weather provider.
    pub enum WeatherSourceError {
        /// Network transport failed before a response arrived.
        Transport => "weather transport failed",
        /// The provider did not answer within the client timeout.
        Timeout => "weather request timed out",
        /// The provider's quota was exhausted.
        RateLimited => "weather provider rate limited request",
        /// The provider answered with an error status.
        Rejected => "weather provider rejected request",
        /// The provider's payload could not be decoded.
        Decode => "weather response decode failed",
    }
}

/// Port fetching the conditions at a coordinate right now.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current observation at `latitude`, `longitude` (WGS84 degrees).
    async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherObservation, WeatherSourceError>;
}

/// Source replaying one fixed observation.
#[derive(Debug, Clone)]
pub struct FixtureWeatherSource {
    observation: WeatherObservation,
}

impl FixtureWeatherSource {
    /// Replay `observation` for every coordinate.
    #[must_use]
    pub fn new(observation: WeatherObservation) -> Self {
        Self { observation }
    }
}

#[async_trait]
impl WeatherSource for FixtureWeatherSource {
    async fn current_conditions(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<WeatherObservation, WeatherSourceError> {
        Ok(self.observation.clone())
    }
}
