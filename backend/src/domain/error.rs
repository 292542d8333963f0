//! Domain-level error types.
//!
//! Errors carry the HTTP status chosen by the layer that raised them. Inbound
//! adapters relay that status verbatim instead of deriving one from the code,
//! so a service can decide, for example, that an upstream quota failure is a
//! `429` while an upstream outage is a `502`.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::TraceId;

/// Header used to surface the request trace identifier to clients.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed or out-of-range input, malformed JSON, or an invalid cursor.
    ValidationError,
    /// Missing or invalid session.
    Unauthorized,
    /// The referenced entity is absent or not owned by the caller.
    NotFound,
    /// A uniqueness rule was violated.
    Conflict,
    /// An upstream quota or local cooldown rejected the request.
    RateLimited,
    /// An upstream provider failed.
    BadGateway,
    /// An unexpected failure.
    Internal,
}

impl ErrorCode {
    /// Status attached by the convenience constructors for this code.
    #[must_use]
    pub const fn default_http_status(self) -> u16 {
        match self {
            Self::ValidationError => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::RateLimited => 429,
            Self::BadGateway => 502,
            Self::Internal => 500,
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
/// - `http_status` is fixed where the error is raised.
///
/// # Examples
/// ```
/// use logbook::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("trip not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.http_status(), 404);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    http_status: u16,
    details: Option<Value>,
    trace_id: Option<String>,
}

/// Validation errors emitted by the fallible constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    /// The message was blank.
    EmptyMessage,
    /// The trace identifier was blank.
    EmptyTraceId,
}

impl std::fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
            Self::EmptyTraceId => write!(f, "trace identifier must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

impl Error {
    /// Create a new error, panicking if validation fails.
    ///
    /// Callers pass literal or formatted messages, so a blank message is a
    /// programming error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    ///
    /// Captures the current trace identifier when one is in scope.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            http_status: code.default_http_status(),
            details: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// HTTP status attached where the error was raised.
    pub fn http_status(&self) -> u16 {
        self.http_status
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Trace identifier captured at construction, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Override the status chosen by the constructor.
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = status;
        self
    }

    /// Attach a trace identifier, panicking when it is blank.
    pub fn with_trace_id(self, trace_id: impl Into<String>) -> Self {
        match self.try_with_trace_id(trace_id) {
            Ok(value) => value,
            Err(err) => panic!("trace identifiers must satisfy validation: {err}"),
        }
    }

    /// Attach a trace identifier after validating it.
    pub fn try_with_trace_id(
        mut self,
        trace_id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        self.trace_id = Some(trace_id);
        Ok(self)
    }

    /// Convenience constructor for [`ErrorCode::ValidationError`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Validation error pinned to one input field.
    ///
    /// # Examples
    /// ```
    /// use logbook::domain::Error;
    ///
    /// let err = Error::invalid_field("limit", "must be between 1 and 100");
    /// assert_eq!(err.message(), "limit: must be between 1 and 100");
    /// assert_eq!(err.http_status(), 400);
    /// ```
    pub fn invalid_field(field: &str, reason: &str) -> Self {
        Self::validation(format!("{field}: {reason}"))
            .with_details(json!({ "field": field, "reason": reason }))
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::RateLimited`].
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RateLimited, message)
    }

    /// Convenience constructor for [`ErrorCode::BadGateway`].
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadGateway, message)
    }

    /// Convenience constructor for [`ErrorCode::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

/// Wire shape of the inner `error` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            details,
        } = value;

        let mut error = Error::try_new(code, message)?;
        error.details = details;
        error.trace_id = None;
        Ok(error)
    }
}
