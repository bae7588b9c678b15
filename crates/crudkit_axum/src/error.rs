//! Handler-side error type.

use crate::response::Envelope;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use crudkit_core::CoreError;
use http::StatusCode;

pub type ApiResult<T> = Result<Envelope<T>, ApiError>;

/// `CoreError` returned from an axum handler.
///
/// The response it produces is a bare 500 carrying the error in its
/// extensions; `translate_errors` swaps it for the translated envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(value: CoreError) -> Self {
        Self(value)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self(CoreError::bad_value(value.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self(CoreError::bad_value(value.body_text()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self(CoreError::bad_value(value.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self.0);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::response::IntoResponse;
    use crudkit_core::CoreError;
    use http::StatusCode;

    #[test]
    fn untranslated_error_is_a_bare_500_carrying_the_error() {
        let response = ApiError(CoreError::not_found("9")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.extensions().get::<CoreError>(),
            Some(&CoreError::not_found("9"))
        );
    }
}
