//! Success-path responder.

use crate::error::ApiError;
use axum::response::{IntoResponse, Response};
use crudkit_core::{CoreError, ResponseEnvelope};
use http::header::CONTENT_TYPE;
use http::{HeaderValue, StatusCode};
use serde::Serialize;

/// Successful handler result, serialized as `{success: true, error: null, data}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<T> {
    status: StatusCode,
    data: T,
}

impl<T> Envelope<T> {
    /// `200 OK` envelope.
    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, data)
    }

    /// `201 Created` envelope.
    pub fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, data)
    }

    pub fn with_status(status: StatusCode, data: T) -> Self {
        Self { status, data }
    }
}

/// A payload that fails to serialize becomes an `InternalServerError`, so the
/// translation layer still answers with an envelope.
impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&ResponseEnvelope::ok(self.data)) {
            Ok(bytes) => (
                self.status,
                [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                bytes,
            )
                .into_response(),
            Err(err) => ApiError(CoreError::internal(err.to_string())).into_response(),
        }
    }
}
