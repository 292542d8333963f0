//! Translation of storage failures into domain errors.

use tracing::{error, warn};

use super::Error;
use super::ports::RepositoryError;

/// Map a storage failure to the domain error and status the caller sees.
///
/// `entity` names the resource in user-facing messages, e.g. `"rod"`.
pub(crate) fn map_repository_error(entity: &str, err: RepositoryError) -> Error {
    match err {
        RepositoryError::Unauthorized { message } => {
            warn!(entity, %message, "storage rejected session credentials");
            Error::unauthorized("session is no longer valid; log in again")
        }
        RepositoryError::Conflict { message } => {
            Error::conflict(format!("{entity} conflicts with an existing record: {message}"))
        }
        RepositoryError::InvalidReference { message } => {
            Error::validation(format!("{entity} references a missing record: {message}"))
        }
        RepositoryError::Connection { message } => {
            error!(entity, %message, "storage unreachable");
            Error::bad_gateway("storage backend unavailable")
        }
        RepositoryError::Query { message } => {
            error!(entity, %message, "storage query failed");
            Error::internal(format!("{entity} storage error: {message}"))
        }
    }
}

/// Not-found error naming the entity and id.
pub(crate) fn not_found(entity: &str, id: impl std::fmt::Display) -> Error {
    Error::not_found(format!("{entity} {id} not found"))
}
