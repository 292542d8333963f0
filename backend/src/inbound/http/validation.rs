//! Request schemas for the inbound HTTP adapter.
//!
//! Every schema is a function `raw -> Result<Typed, Issues>`. Issues are
//! recorded in field declaration order and only the first one reaches the
//! client, as `details: {field, reason}` on a `validation_error`. Cross-field
//! rules run only once every field passed its own rule.

use std::fmt;

use actix_web::web;
use chrono::{DateTime, Utc};
use pagination::{CursorData, PageLimit, SortOrder};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::listing::SEARCH_MAX;
use crate::domain::{Error, ListRequest, SortColumn};

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Offending input field.
    pub field: &'static str,
    /// Why the value was rejected.
    pub reason: String,
}

impl Issue {
    /// Record `reason` against `field`.
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl From<Issue> for Error {
    fn from(issue: Issue) -> Self {
        Error::invalid_field(issue.field, &issue.reason)
    }
}

/// Ordered list of failed rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issues(Vec<Issue>);

impl Issues {
    /// Record a failure.
    pub fn push(&mut self, field: &'static str, reason: impl Into<String>) {
        self.0.push(Issue::new(field, reason));
    }

    /// Whether no rule failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The issue reported to clients.
    #[must_use]
    pub fn first(&self) -> Option<&Issue> {
        self.0.first()
    }

    /// Every recorded issue in declaration order.
    #[must_use]
    pub fn all(&self) -> &[Issue] {
        &self.0
    }

    /// `Ok(value)` when no rule failed.
    ///
    /// # Errors
    /// Returns `self` when at least one issue was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<Issues> for Error {
    fn from(issues: Issues) -> Self {
        match issues.0.into_iter().next() {
            Some(issue) => issue.into(),
            None => Error::validation("request failed validation"),
        }
    }
}

/// Rule applied to one JSON value.
pub type Rule<T> = fn(&Value) -> Result<T, String>;

/// Path segment parsed as a UUID.
///
/// # Errors
/// Returns a `validation_error` naming `field` when `raw` is not a UUID.
pub fn path_uuid(field: &'static str, raw: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|_| Issue::new(field, "must be a valid UUID").into())
}

/// Query string accepted by every list endpoint, before validation.
#[derive(Debug, Default, Deserialize)]
pub struct RawListQuery {
    q: Option<String>,
    include_deleted: Option<String>,
    limit: Option<String>,
    cursor: Option<String>,
    sort: Option<String>,
    order: Option<String>,
}

impl RawListQuery {
    /// Decode a raw query string.
    ///
    /// # Errors
    /// Returns a `validation_error` on `query` when the string is not
    /// form-encoded.
    pub fn from_query_string(query: &str) -> Result<Self, Error> {
        web::Query::<Self>::from_query(query)
            .map(web::Query::into_inner)
            .map_err(|_| Issue::new("query", "must be a valid query string").into())
    }
}

/// Validate the list query string for a collection sorted by `S`.
///
/// # Errors
/// Returns the issues found, in field order.
pub fn list_query<S: SortColumn>(raw: RawListQuery) -> Result<ListRequest<S>, Issues> {
    let mut issues = Issues::default();

    let search = raw
        .q
        .map(|term| term.trim().to_owned())
        .filter(|term| !term.is_empty());
    if search
        .as_ref()
        .is_some_and(|term| term.chars().count() > SEARCH_MAX)
    {
        issues.push("q", format!("must be at most {SEARCH_MAX} characters"));
    }

    let include_deleted = match raw.include_deleted.as_deref() {
        None => false,
        Some(value) => parse_flag(value).unwrap_or_else(|| {
            issues.push("include_deleted", "must be a boolean");
            false
        }),
    };

    let limit = match raw.limit.as_deref() {
        None => PageLimit::default(),
        Some(value) => match value.trim().parse::<i64>() {
            Err(_) => {
                issues.push("limit", "must be an integer");
                PageLimit::default()
            }
            Ok(number) => PageLimit::new(number).unwrap_or_else(|_| {
                issues.push(
                    "limit",
                    format!(
                        "must be between {} and {}",
                        PageLimit::MIN,
                        PageLimit::MAX
                    ),
                );
                PageLimit::default()
            }),
        },
    };

    let cursor = raw.cursor.as_deref().and_then(|token| {
        CursorData::decode(token)
            .map_err(|invalid| issues.push("cursor", invalid.to_string()))
            .ok()
    });

    let sort = match raw.sort.as_deref() {
        None => S::default(),
        Some(value) => S::parse(value).unwrap_or_else(|| {
            issues.push("sort", format!("must be one of: {}", S::allowed()));
            S::default()
        }),
    };

    let order = match raw.order.as_deref() {
        None => sort.default_order(),
        Some(value) => value.parse::<SortOrder>().unwrap_or_else(|_| {
            issues.push("order", "must be one of: asc, desc");
            sort.default_order()
        }),
    };

    issues.finish(ListRequest {
        search,
        include_deleted,
        limit,
        cursor,
        sort,
        order,
    })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Field-by-field reader over a JSON object body.
///
/// Values returned after a failed rule are placeholders; [`Self::finish`]
/// fails whenever one was produced, so they never escape.
#[derive(Debug)]
pub struct BodyReader {
    fields: Map<String, Value>,
    issues: Issues,
}

enum Slot {
    Absent,
    Null,
    Present(Value),
}

impl BodyReader {
    /// Parse raw request bytes into an object reader.
    ///
    /// # Errors
    /// Returns a `validation_error` on `body` for malformed JSON or a
    /// non-object document.
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|_| Error::from(Issue::new("body", "must be valid JSON")))?;
        match value {
            Value::Object(fields) => Ok(Self {
                fields,
                issues: Issues::default(),
            }),
            _ => Err(Issue::new("body", "must be a JSON object").into()),
        }
    }

    fn take(&mut self, name: &str) -> Slot {
        match self.fields.remove(name) {
            None => Slot::Absent,
            Some(Value::Null) => Slot::Null,
            Some(value) => Slot::Present(value),
        }
    }

    fn apply<T>(&mut self, name: &'static str, value: &Value, rule: Rule<T>) -> Option<T> {
        rule(value)
            .map_err(|reason| self.issues.push(name, reason))
            .ok()
    }

    /// Whether no rule has failed so far.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Field that must be present and non-null.
    pub fn required<T: Default>(&mut self, name: &'static str, rule: Rule<T>) -> T {
        match self.take(name) {
            Slot::Absent | Slot::Null => {
                self.issues.push(name, "is required");
                T::default()
            }
            Slot::Present(value) => self.apply(name, &value, rule).unwrap_or_default(),
        }
    }

    /// Field that may be absent or null.
    pub fn optional<T>(&mut self, name: &'static str, rule: Rule<T>) -> Option<T> {
        match self.take(name) {
            Slot::Absent | Slot::Null => None,
            Slot::Present(value) => self.apply(name, &value, rule),
        }
    }

    /// Field with a default used when absent or null.
    pub fn or_default<T: Default>(&mut self, name: &'static str, rule: Rule<T>) -> T {
        self.optional(name, rule).unwrap_or_default()
    }

    /// Patch of a non-nullable column: absent means unchanged.
    pub fn patch<T>(&mut self, name: &'static str, rule: Rule<T>) -> Option<T> {
        match self.take(name) {
            Slot::Absent => None,
            Slot::Null => {
                self.issues.push(name, "must not be null");
                None
            }
            Slot::Present(value) => self.apply(name, &value, rule),
        }
    }

    /// Patch of a nullable column: absent means unchanged, null clears.
    pub fn patch_nullable<T>(&mut self, name: &'static str, rule: Rule<T>) -> Option<Option<T>> {
        match self.take(name) {
            Slot::Absent => None,
            Slot::Null => Some(None),
            Slot::Present(value) => self.apply(name, &value, rule).map(Some),
        }
    }

    /// Record a cross-field failure when every field rule passed.
    pub fn refine(&mut self, holds: bool, field: &'static str, reason: &str) {
        if self.is_clean() && !holds {
            self.issues.push(field, reason);
        }
    }

    /// Reject a patch that supplied no recognised field.
    pub fn require_change(&mut self, empty: bool) {
        self.refine(!empty, "body", "must contain at least one field");
    }

    /// Finish reading, yielding `value` when every rule passed.
    ///
    /// # Errors
    /// Returns the recorded issues.
    pub fn finish<T>(self, value: T) -> Result<T, Issues> {
        self.issues.finish(value)
    }
}

/// Latitude and longitude are supplied together or not at all.
///
/// Reports the missing half.
pub fn coordinate_pair(reader: &mut BodyReader, latitude_set: bool, longitude_set: bool) {
    reader.refine(
        !latitude_set || longitude_set,
        "longitude",
        "is required when latitude is set",
    );
    reader.refine(
        !longitude_set || latitude_set,
        "latitude",
        "is required when longitude is set",
    );
}

/// Pair rule for a patch, where `Some(None)` clears a coordinate.
///
/// Both keys must be supplied together, and either both carry values or
/// both are `null`. The issue lands on the absent or `null` side.
pub fn patched_coordinate_pair(
    reader: &mut BodyReader,
    latitude: Option<Option<f64>>,
    longitude: Option<Option<f64>>,
) {
    coordinate_pair(reader, latitude.is_some(), longitude.is_some());
    if let (Some(latitude), Some(longitude)) = (latitude, longitude) {
        coordinate_pair(reader, latitude.is_some(), longitude.is_some());
    }
}

pub mod rules {
    //! Reusable per-value rules.

    use super::{DateTime, Utc, Uuid, Value};

    /// Trimmed, non-empty string of at most `max` characters.
    pub fn text<const MAX: usize>(value: &Value) -> Result<String, String> {
        let raw = value.as_str().ok_or("must be a string")?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("must not be empty".to_owned());
        }
        if trimmed.chars().count() > MAX {
            return Err(format!("must be at most {MAX} characters"));
        }
        Ok(trimmed.to_owned())
    }

    /// Finite number.
    pub fn number(value: &Value) -> Result<f64, String> {
        value
            .as_f64()
            .filter(|number| number.is_finite())
            .ok_or_else(|| "must be a number".to_owned())
    }

    /// Number in `(0, max]`.
    pub fn positive_up_to(value: &Value, max: f64) -> Result<f64, String> {
        let number = number(value)?;
        if number > 0.0 && number <= max {
            Ok(number)
        } else {
            Err(format!("must be greater than 0 and at most {max}"))
        }
    }

    /// Number in `[min, max]`.
    pub fn between(value: &Value, min: f64, max: f64) -> Result<f64, String> {
        let number = number(value)?;
        if (min..=max).contains(&number) {
            Ok(number)
        } else {
            Err(format!("must be between {min} and {max}"))
        }
    }

    /// Latitude in degrees.
    pub fn latitude(value: &Value) -> Result<f64, String> {
        between(value, -90.0, 90.0)
    }

    /// Longitude in degrees.
    pub fn longitude(value: &Value) -> Result<f64, String> {
        between(value, -180.0, 180.0)
    }

    /// Number not below zero.
    pub fn non_negative(value: &Value) -> Result<f64, String> {
        let number = number(value)?;
        if number >= 0.0 {
            Ok(number)
        } else {
            Err("must not be negative".to_owned())
        }
    }

    /// Number strictly above zero.
    pub fn positive(value: &Value) -> Result<f64, String> {
        let number = number(value)?;
        if number > 0.0 {
            Ok(number)
        } else {
            Err("must be greater than 0".to_owned())
        }
    }

    /// Any finite number.
    pub fn any_number(value: &Value) -> Result<f64, String> {
        number(value)
    }

    /// JSON boolean.
    pub fn boolean(value: &Value) -> Result<bool, String> {
        value.as_bool().ok_or_else(|| "must be a boolean".to_owned())
    }

    /// RFC 3339 timestamp, normalised to UTC.
    pub fn timestamp(value: &Value) -> Result<DateTime<Utc>, String> {
        value
            .as_str()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|parsed| parsed.with_timezone(&Utc))
            .ok_or_else(|| "must be an RFC 3339 timestamp".to_owned())
    }

    /// UUID string.
    pub fn uuid(value: &Value) -> Result<Uuid, String> {
        value
            .as_str()
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .ok_or_else(|| "must be a valid UUID".to_owned())
    }
}
