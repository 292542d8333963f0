//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into the `{"error": {...}}` envelope. The
//! status is the one the raising layer attached, never re-derived from the
//! code.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

const REDACTED_MESSAGE: &str = "Internal server error";

/// Body of every error response.
#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: &'a Error,
}

fn status_for(error: &Error) -> StatusCode {
    StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::Internal) {
        let mut redacted = Error::internal(REDACTED_MESSAGE).with_http_status(error.http_status());
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::Internal) {
            error!(message = %self.message(), trace_id = ?self.trace_id(), "internal error");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        let body = redact_if_internal(self);
        builder.json(ErrorEnvelope { error: &body })
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}
