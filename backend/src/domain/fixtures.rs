//! Builders shared by domain unit tests.

use chrono::{DateTime, Utc};
use rstest::fixture;
use uuid::Uuid;

use super::{
    AccessToken, CatchDraft, Email, Identity, Rod, Trip, UserId, WeatherObservation,
    WeatherSnapshot,
};

#[fixture]
pub(crate) fn identity() -> Identity {
    Identity::new(
        UserId::random(),
        Email::new("angler@example.com").expect("email"),
        AccessToken::new("test-token").expect("token"),
    )
}

fn epoch() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-05-01T05:00:00Z")
        .expect("timestamp")
        .with_timezone(&Utc)
}

pub(crate) fn rod(identity: &Identity, name: &str) -> Rod {
    Rod {
        id: Uuid::new_v4(),
        user_id: identity.user_id(),
        name: name.to_owned(),
        brand: None,
        model: None,
        length_m: None,
        power: None,
        action: None,
        notes: None,
        created_at: epoch(),
        updated_at: epoch(),
        deleted_at: None,
    }
}

pub(crate) fn trip(identity: &Identity, title: &str) -> Trip {
    Trip {
        id: Uuid::new_v4(),
        user_id: identity.user_id(),
        title: title.to_owned(),
        location_name: None,
        latitude: None,
        longitude: None,
        started_at: epoch(),
        ended_at: None,
        notes: None,
        created_at: epoch(),
        updated_at: epoch(),
        deleted_at: None,
    }
}

pub(crate) fn catch_draft(species: &str) -> CatchDraft {
    CatchDraft {
        species: species.to_owned(),
        length_cm: None,
        weight_kg: None,
        caught_at: epoch(),
        rod_id: None,
        released: false,
        notes: None,
    }
}

pub(crate) fn observation(observed_at: DateTime<Utc>) -> WeatherObservation {
    WeatherObservation {
        observed_at,
        temperature_c: Some(17.2),
        wind_speed_kmh: Some(9.0),
        wind_direction_deg: Some(240.0),
        pressure_hpa: Some(1014.0),
        precipitation_mm: Some(0.0),
        cloud_cover_pct: Some(40.0),
        description: None,
    }
}

pub(crate) fn snapshot(identity: &Identity, trip_id: Uuid, at: DateTime<Utc>) -> WeatherSnapshot {
    WeatherSnapshot {
        id: Uuid::new_v4(),
        user_id: identity.user_id(),
        trip_id,
        source: "manual".to_owned(),
        observation: observation(at),
        created_at: at,
    }
}
