//! Reqwest-backed Open-Meteo source.
//!
//! Owns transport details only: query construction, timeout and status
//! mapping, and decoding of the `current` block into an observation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{CURRENT_VARIABLES, ForecastDto};
use crate::domain::WeatherObservation;
use crate::domain::ports::{WeatherSource, WeatherSourceError};

/// Public Open-Meteo API root.
pub const DEFAULT_OPEN_METEO_URL: &str = "https://api.open-meteo.com";
const USER_AGENT: &str = "logbook-backend/0.1";

/// Weather source calling `GET /v1/forecast` on one Open-Meteo host.
pub struct OpenMeteoSource {
    client: Client,
    base_url: Url,
}

impl OpenMeteoSource {
    /// Build a source with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn forecast_url(&self, latitude: f64, longitude: f64) -> Result<Url, WeatherSourceError> {
        let mut url = self
            .base_url
            .join("v1/forecast")
            .map_err(|err| WeatherSourceError::rejected(format!("invalid base url: {err}")))?;
        url.query_pairs_mut()
            .append_pair("latitude", &latitude.to_string())
            .append_pair("longitude", &longitude.to_string())
            .append_pair("current", CURRENT_VARIABLES)
            .append_pair("timeformat", "unixtime")
            .append_pair("timezone", "UTC");
        Ok(url)
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoSource {
    async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherObservation, WeatherSourceError> {
        let url = self.forecast_url(latitude, longitude)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_observation(body.as_ref())
    }
}

fn parse_observation(body: &[u8]) -> Result<WeatherObservation, WeatherSourceError> {
    let decoded: ForecastDto = serde_json::from_slice(body).map_err(|error| {
        WeatherSourceError::decode(format!("invalid Open-Meteo payload: {error}"))
    })?;
    decoded
        .into_observation()
        .map_err(WeatherSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> WeatherSourceError {
    if error.is_timeout() {
        WeatherSourceError::timeout(error.to_string())
    } else {
        WeatherSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> WeatherSourceError {
    let message = format!(
        "status {}: {}",
        status.as_u16(),
        String::from_utf8_lossy(body).chars().take(160).collect::<String>()
    );
    match status {
        StatusCode::TOO_MANY_REQUESTS => WeatherSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            WeatherSourceError::timeout(message)
        }
        _ => WeatherSourceError::rejected(message),
    }
}
