//! Translation of `CoreError` values into transport responses.
//!
//! # Responsibility
//! - Keep one handler per `ErrorKind` in a table built once at startup.
//! - Turn a raised error into a status code plus a failed envelope.
//!
//! # Invariants
//! - The table is total over `ErrorKind::ALL` and immutable after construction.
//! - Handlers are pure: same `(request, error)` in, same response out.
//! - `message` is the kind prefix, plus `:<cause>` only when the cause is non-empty.

use crate::envelope::{ErrorPayload, ResponseEnvelope};
use crate::error::{CoreError, ErrorKind};
use http::{Method, StatusCode, Uri};
use log::{error, warn};

/// Request facts a handler may read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    pub method: Method,
    pub uri: Uri,
}

impl RequestInfo {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self { method, uri }
    }
}

/// Response description produced for a failed call chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub body: ResponseEnvelope<()>,
}

pub type ErrorHandler = fn(&RequestInfo, &CoreError) -> ErrorResponse;

/// Builds `prefix` or `prefix:cause`.
pub fn build_message(prefix: &str, cause: &str) -> String {
    if cause.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}:{cause}")
    }
}

fn respond(kind: ErrorKind, err: &CoreError) -> ErrorResponse {
    let message = build_message(kind.message_prefix(), err.detail());
    ErrorResponse {
        status: kind.status(),
        body: ResponseEnvelope::failure(ErrorPayload::new(message, kind.label())),
    }
}

fn bad_value_handler(_request: &RequestInfo, err: &CoreError) -> ErrorResponse {
    respond(ErrorKind::BadValue, err)
}

fn not_found_handler(_request: &RequestInfo, err: &CoreError) -> ErrorResponse {
    respond(ErrorKind::NotFound, err)
}

fn duplicated_handler(_request: &RequestInfo, err: &CoreError) -> ErrorResponse {
    respond(ErrorKind::Duplicated, err)
}

fn internal_server_error_handler(_request: &RequestInfo, err: &CoreError) -> ErrorResponse {
    respond(ErrorKind::InternalServerError, err)
}

fn database_error_handler(_request: &RequestInfo, err: &CoreError) -> ErrorResponse {
    respond(ErrorKind::DatabaseError, err)
}

fn database_integrity_error_handler(_request: &RequestInfo, err: &CoreError) -> ErrorResponse {
    respond(ErrorKind::DatabaseIntegrityError, err)
}

/// Immutable `ErrorKind -> handler` registration table.
///
/// Build it once with [`HandlerTable::standard`] and share it by reference
/// (or behind an `Arc`) with the transport layer.
#[derive(Debug, Clone)]
pub struct HandlerTable {
    entries: [(ErrorKind, ErrorHandler); 6],
}

impl HandlerTable {
    /// Table with the standard handler for every kind, in `ErrorKind::ALL` order.
    pub fn standard() -> Self {
        Self {
            entries: [
                (ErrorKind::BadValue, bad_value_handler as ErrorHandler),
                (ErrorKind::NotFound, not_found_handler),
                (ErrorKind::Duplicated, duplicated_handler),
                (ErrorKind::InternalServerError, internal_server_error_handler),
                (ErrorKind::DatabaseError, database_error_handler),
                (
                    ErrorKind::DatabaseIntegrityError,
                    database_integrity_error_handler,
                ),
            ],
        }
    }

    /// Registrations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(ErrorKind, ErrorHandler)> {
        self.entries.iter()
    }

    pub fn handler_for(&self, kind: ErrorKind) -> ErrorHandler {
        let (registered, handler) = self.entries[slot(kind)];
        debug_assert_eq!(registered, kind);
        handler
    }

    /// Runs the handler registered for the error's exact kind.
    pub fn translate(&self, request: &RequestInfo, err: &CoreError) -> ErrorResponse {
        let kind = err.kind();
        let response = (self.handler_for(kind))(request, err);
        if response.status.is_server_error() {
            error!(
                "event=error_translated module=translate status=error method={} path={} status_code={} error_type={}",
                request.method,
                request.uri.path(),
                response.status.as_u16(),
                kind.label()
            );
        } else {
            warn!(
                "event=error_translated module=translate status=handled method={} path={} status_code={} error_type={}",
                request.method,
                request.uri.path(),
                response.status.as_u16(),
                kind.label()
            );
        }
        response
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn slot(kind: ErrorKind) -> usize {
    match kind {
        ErrorKind::BadValue => 0,
        ErrorKind::NotFound => 1,
        ErrorKind::Duplicated => 2,
        ErrorKind::InternalServerError => 3,
        ErrorKind::DatabaseError => 4,
        ErrorKind::DatabaseIntegrityError => 5,
    }
}
