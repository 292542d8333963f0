//! Trip entity and its time-window rule.

use chrono::{DateTime, Utc};
use pagination::SortOrder;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::listing::{Keyed, SortColumn, sort_timestamp};
use super::rods::overwrite;
use super::user::UserId;

/// Maximum length of a trip title.
pub const TRIP_TITLE_MAX: usize = 200;
/// Maximum length of a trip location name.
pub const LOCATION_NAME_MAX: usize = 200;
/// Reason attached to `ended_at` when the window is inverted.
pub const ENDED_BEFORE_STARTED: &str = "must not be earlier than started_at";

/// A fishing trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub user_id: UserId,
    pub title: String,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Trip {
    /// Latitude and longitude when both are recorded.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Whether `term` occurs, case-insensitively, in the title, location name
    /// or notes.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [Some(&self.title), self.location_name.as_ref(), self.notes.as_ref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Whether a trip window is well ordered.
#[must_use]
pub fn window_is_valid(started_at: DateTime<Utc>, ended_at: Option<DateTime<Utc>>) -> bool {
    ended_at.is_none_or(|ended| ended >= started_at)
}

/// Validated input for a new trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripDraft {
    pub title: String,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Validated partial update of a trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

impl TripPatch {
    /// Whether no field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Whether the patch moves exactly one end of the trip window.
    #[must_use]
    pub fn touches_one_window_end(&self) -> bool {
        self.started_at.is_some() != self.ended_at.is_some()
    }

    /// Window resulting from applying the patch to `trip`.
    #[must_use]
    pub fn merged_window(&self, trip: &Trip) -> (DateTime<Utc>, Option<DateTime<Utc>>) {
        (
            self.started_at.unwrap_or(trip.started_at),
            self.ended_at.unwrap_or(trip.ended_at),
        )
    }

    /// Write every supplied field into `trip`.
    pub fn apply_to(&self, trip: &mut Trip) {
        if let Some(title) = &self.title {
            trip.title.clone_from(title);
        }
        if let Some(started_at) = self.started_at {
            trip.started_at = started_at;
        }
        overwrite(&mut trip.location_name, &self.location_name);
        overwrite(&mut trip.latitude, &self.latitude);
        overwrite(&mut trip.longitude, &self.longitude);
        overwrite(&mut trip.ended_at, &self.ended_at);
        overwrite(&mut trip.notes, &self.notes);
    }
}

/// Sortable trip columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripSort {
    #[default]
    StartedAt,
    CreatedAt,
    Title,
}

impl SortColumn for TripSort {
    const ALL: &'static [Self] = &[Self::StartedAt, Self::CreatedAt, Self::Title];

    fn column(self) -> &'static str {
        match self {
            Self::StartedAt => "started_at",
            Self::CreatedAt => "created_at",
            Self::Title => "title",
        }
    }

    fn default_order(self) -> SortOrder {
        match self {
            Self::Title => SortOrder::Asc,
            Self::StartedAt | Self::CreatedAt => SortOrder::Desc,
        }
    }
}

impl Keyed<TripSort> for Trip {
    fn key_id(&self) -> Uuid {
        self.id
    }

    fn sort_value(&self, column: TripSort) -> String {
        match column {
            TripSort::StartedAt => sort_timestamp(&self.started_at),
            TripSort::CreatedAt => sort_timestamp(&self.created_at),
            TripSort::Title => self.title.clone(),
        }
    }
}
