//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes. Storage and internal failures are redacted before they reach
//! clients; the trace identifier survives so operators can find the log line.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned for malformed or mistyped JSON bodies.
pub const INVALID_BODY_MESSAGE: &str = "invalid or missing fields in the request body";

/// Message returned when a query string cannot be decoded.
pub const INVALID_QUERY_MESSAGE: &str = "invalid query parameters";

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::EnrichmentFailed
        | ErrorCode::PersistenceFailed
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn is_redacted(code: ErrorCode) -> bool {
    matches!(code, ErrorCode::PersistenceFailed | ErrorCode::InternalError)
}

fn redact_if_internal(error: &Error) -> Error {
    if is_redacted(error.code()) {
        let mut redacted = Error::new(error.code(), REDACTED_MESSAGE);
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
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = ?self.code(), message = self.message(), "request failed");
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}

/// Error handler for `web::JsonConfig` so malformed bodies share the
/// catalogue's error shape.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected request body");
    Error::invalid_request(INVALID_BODY_MESSAGE)
        .with_details(json!({ "code": "invalid_body" }))
        .into()
}

/// Error handler for `web::QueryConfig`; duplicated or undecodable query
/// parameters get the same JSON shape as every other client error.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected query string");
    Error::invalid_request(INVALID_QUERY_MESSAGE)
        .with_details(json!({ "code": "invalid_query" }))
        .into()
}
