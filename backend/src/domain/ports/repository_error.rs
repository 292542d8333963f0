//! Failure taxonomy shared by the storage ports.

use super::define_port_error;

define_port_error! {
    /// Errors raised by storage adapters.
    ///
    /// Absence is not an error: lookups return `Option` and deletes return
    /// whether a row was removed, so callers choose the not-found message.
    pub enum RepositoryError {
        /// Storage refused the caller's credentials.
        Unauthorized => "storage rejected credentials",
        /// A uniqueness constraint was violated.
        Conflict => "storage conflict",
        /// A referenced row does not exist or is not visible.
        InvalidReference => "storage reference invalid",
        /// Storage could not be reached.
        Connection => "storage connection failed",
        /// Storage accepted the request but failed to execute it.
        Query => "storage query failed",
    }
}
