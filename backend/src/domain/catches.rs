//! Catch entity: a fish recorded during a trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rods::overwrite;
use super::user::UserId;

/// Maximum length of a species name.
pub const SPECIES_MAX: usize = 100;
/// Upper bound for catch length in centimetres and weight in kilograms.
pub const MEASUREMENT_MAX: f64 = 1000.0;

/// A recorded catch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catch {
    pub id: Uuid,
    pub user_id: UserId,
    pub trip_id: Uuid,
    pub species: String,
    pub length_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub caught_at: DateTime<Utc>,
    pub rod_id: Option<Uuid>,
    pub released: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new catch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchDraft {
    pub species: String,
    pub length_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub caught_at: DateTime<Utc>,
    pub rod_id: Option<Uuid>,
    pub released: bool,
    pub notes: Option<String>,
}

/// Validated partial update of a catch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatchPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_cm: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caught_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rod_id: Option<Option<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

impl CatchPatch {
    /// Whether no field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Rod the patch links the catch to, if it sets one.
    #[must_use]
    pub fn linked_rod(&self) -> Option<Uuid> {
        self.rod_id.flatten()
    }

    /// Write every supplied field into `catch`.
    pub fn apply_to(&self, catch: &mut Catch) {
        if let Some(species) = &self.species {
            catch.species.clone_from(species);
        }
        if let Some(caught_at) = self.caught_at {
            catch.caught_at = caught_at;
        }
        if let Some(released) = self.released {
            catch.released = released;
        }
        overwrite(&mut catch.length_cm, &self.length_cm);
        overwrite(&mut catch.weight_kg, &self.weight_kg);
        overwrite(&mut catch.rod_id, &self.rod_id);
        overwrite(&mut catch.notes, &self.notes);
    }
}
