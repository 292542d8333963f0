//! Weather snapshots attached to trips.

use chrono::{DateTime, Utc};
use pagination::SortOrder;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::listing::{Keyed, SortColumn, sort_timestamp};
use super::user::UserId;

/// Source label stored for snapshots entered by hand.
pub const SOURCE_MANUAL: &str = "manual";
/// Source label stored for snapshots fetched from Open-Meteo.
pub const SOURCE_OPEN_METEO: &str = "open-meteo";
/// Maximum length of a free-text weather description.
pub const DESCRIPTION_MAX: usize = 200;

/// Measured conditions at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub observed_at: DateTime<Utc>,
    pub temperature_c: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub cloud_cover_pct: Option<f64>,
    pub description: Option<String>,
}

/// A stored observation linked to a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub id: Uuid,
    pub user_id: UserId,
    pub trip_id: Uuid,
    pub source: String,
    #[serde(flatten)]
    pub observation: WeatherObservation,
    pub created_at: DateTime<Utc>,
}

/// Observation plus the label of where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshotDraft {
    pub source: String,
    #[serde(flatten)]
    pub observation: WeatherObservation,
}

impl WeatherSnapshotDraft {
    /// Draft for an observation entered by the angler.
    #[must_use]
    pub fn manual(observation: WeatherObservation) -> Self {
        Self {
            source: SOURCE_MANUAL.to_owned(),
            observation,
        }
    }

    /// Draft for an observation fetched from Open-Meteo.
    #[must_use]
    pub fn open_meteo(observation: WeatherObservation) -> Self {
        Self {
            source: SOURCE_OPEN_METEO.to_owned(),
            observation,
        }
    }
}

/// Sortable weather snapshot columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherSort {
    #[default]
    ObservedAt,
    CreatedAt,
}

impl SortColumn for WeatherSort {
    const ALL: &'static [Self] = &[Self::ObservedAt, Self::CreatedAt];

    fn column(self) -> &'static str {
        match self {
            Self::ObservedAt => "observed_at",
            Self::CreatedAt => "created_at",
        }
    }

    fn default_order(self) -> SortOrder {
        SortOrder::Desc
    }
}

impl Keyed<WeatherSort> for WeatherSnapshot {
    fn key_id(&self) -> Uuid {
        self.id
    }

    fn sort_value(&self, column: WeatherSort) -> String {
        match column {
            WeatherSort::ObservedAt => sort_timestamp(&self.observation.observed_at),
            WeatherSort::CreatedAt => sort_timestamp(&self.created_at),
        }
    }
}
