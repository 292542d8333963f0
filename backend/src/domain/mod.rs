//! Domain primitives, entities, ports and services.
//!
//! Purpose: define the logbook's strongly typed entities (rods, trips,
//! catches, weather snapshots), the shared keyset list model, the driven
//! ports adapters implement and the services inbound adapters call.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: domain failure carrying its HTTP status.
//! - `Identity`: the authenticated caller.
//! - `ListRequest` / `SortColumn` / `Keyed`: keyset list parameters.
//! - `RodService`, `TripService`, `CatchService`, `WeatherService`,
//!   `SessionService`: use-cases.

pub mod catch_service;
pub mod catches;
pub mod error;
pub mod listing;
pub mod ports;
pub mod rod_service;
pub mod rods;
pub mod session_service;
mod storage_errors;
pub mod trace_id;
pub mod trip_service;
pub mod trips;
pub mod user;
pub mod weather;
pub mod weather_service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use self::catch_service::CatchService;
pub use self::catches::{Catch, CatchDraft, CatchPatch};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::listing::{Keyed, ListRequest, SortColumn, apply_keyset, sort_timestamp};
pub use self::rod_service::RodService;
pub use self::rods::{Rod, RodDraft, RodPatch, RodSort};
pub use self::session_service::SessionService;
pub use self::trace_id::TraceId;
pub use self::trip_service::TripService;
pub use self::trips::{Trip, TripDraft, TripPatch, TripSort};
pub use self::user::{
    AccessToken, Email, Identity, LoginCredentials, Profile, UserId, UserValidationError,
};
pub use self::weather::{WeatherObservation, WeatherSnapshot, WeatherSnapshotDraft, WeatherSort};
pub use self::weather_service::WeatherService;

/// Longest free-text note accepted on any entity.
pub const NOTES_MAX: usize = 2000;

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use logbook::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("trip not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
