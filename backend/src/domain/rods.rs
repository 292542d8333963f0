//! Rod (fishing equipment) entity.

use chrono::{DateTime, Utc};
use pagination::SortOrder;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::listing::{Keyed, SortColumn, sort_timestamp};
use super::user::UserId;

/// Maximum length of a rod name.
pub const ROD_NAME_MAX: usize = 100;
/// Maximum length of rod brand, model, power and action labels.
pub const ROD_LABEL_MAX: usize = 100;
/// Longest accepted rod, in metres.
pub const ROD_LENGTH_MAX_M: f64 = 10.0;

/// A rod owned by an angler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rod {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub length_m: Option<f64>,
    pub power: Option<String>,
    pub action: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Rod {
    /// Whether `term` occurs, case-insensitively, in the name, brand or model.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [Some(&self.name), self.brand.as_ref(), self.model.as_ref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Validated input for a new rod.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RodDraft {
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub length_m: Option<f64>,
    pub power: Option<String>,
    pub action: Option<String>,
    pub notes: Option<String>,
}

/// Validated partial update of a rod.
///
/// The outer `Option` tells whether a field was supplied; for nullable
/// columns the inner `None` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RodPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_m: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

impl RodPatch {
    /// Whether no field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Write every supplied field into `rod`.
    pub fn apply_to(&self, rod: &mut Rod) {
        if let Some(name) = &self.name {
            rod.name.clone_from(name);
        }
        overwrite(&mut rod.brand, &self.brand);
        overwrite(&mut rod.model, &self.model);
        overwrite(&mut rod.length_m, &self.length_m);
        overwrite(&mut rod.power, &self.power);
        overwrite(&mut rod.action, &self.action);
        overwrite(&mut rod.notes, &self.notes);
    }
}

pub(crate) fn overwrite<T: Clone>(slot: &mut Option<T>, change: &Option<Option<T>>) {
    if let Some(value) = change {
        slot.clone_from(value);
    }
}

/// Sortable rod columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RodSort {
    #[default]
    Name,
    CreatedAt,
    UpdatedAt,
}

impl SortColumn for RodSort {
    const ALL: &'static [Self] = &[Self::Name, Self::CreatedAt, Self::UpdatedAt];

    fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    fn default_order(self) -> SortOrder {
        match self {
            Self::Name => SortOrder::Asc,
            Self::CreatedAt | Self::UpdatedAt => SortOrder::Desc,
        }
    }
}

impl Keyed<RodSort> for Rod {
    fn key_id(&self) -> Uuid {
        self.id
    }

    fn sort_value(&self, column: RodSort) -> String {
        match column {
            RodSort::Name => self.name.clone(),
            RodSort::CreatedAt => sort_timestamp(&self.created_at),
            RodSort::UpdatedAt => sort_timestamp(&self.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn rod() -> Rod {
        let ts = Utc.with_ymd_and_hms(2026, 4, 2, 9, 0, 0).single().expect("timestamp");
        Rod {
            id: Uuid::nil(),
            user_id: UserId::random(),
            name: "Spinning 2.7".into(),
            brand: Some("Shimano".into()),
            model: None,
            length_m: Some(2.7),
            power: None,
            action: None,
            notes: Some("old".into()),
            created_at: ts,
            updated_at: ts,
            deleted_at: None,
        }
    }

    #[rstest]
    #[case("spinning", true)]
    #[case("SHIMANO", true)]
    #[case("daiwa", false)]
    fn search_matches_name_and_brand(rod: Rod, #[case] term: &str, #[case] expected: bool) {
        assert_eq!(rod.matches(term), expected);
    }

    #[rstest]
    fn patch_clears_and_keeps_fields(mut rod: Rod) {
        let patch = RodPatch {
            notes: Some(None),
            model: Some(Some("Catana".into())),
            ..RodPatch::default()
        };
        patch.apply_to(&mut rod);
        assert_eq!(rod.notes, None);
        assert_eq!(rod.model.as_deref(), Some("Catana"));
        assert_eq!(rod.brand.as_deref(), Some("Shimano"));
    }

    #[rstest]
    fn patch_serialises_only_supplied_fields() {
        let patch = RodPatch {
            notes: Some(None),
            ..RodPatch::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(
            serde_json::to_value(&patch).expect("json"),
            serde_json::json!({"notes": null})
        );
    }

    #[rstest]
    fn timestamp_sort_values_are_fixed_width(rod: Rod) {
        assert_eq!(
            rod.sort_value(RodSort::CreatedAt),
            "2026-04-02T09:00:00.000000Z"
        );
    }
}
