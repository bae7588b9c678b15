//! Error translation middleware.

use crate::error::ApiError;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use crudkit_core::{CoreError, ErrorResponse, HandlerTable, RequestInfo};
use http::{Method, Uri};
use std::sync::Arc;

/// Renders a translated error as an HTTP response.
pub fn error_response(translated: ErrorResponse) -> Response {
    (translated.status, Json(translated.body)).into_response()
}

/// Replaces any response carrying a `CoreError` with its translation.
pub async fn translate_errors(table: Arc<HandlerTable>, request: Request, next: Next) -> Response {
    let info = RequestInfo::new(request.method().clone(), request.uri().clone());
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<CoreError>() {
        Some(err) => error_response(table.translate(&info, &err)),
        None => response,
    }
}

async fn unmatched_route(uri: Uri) -> ApiError {
    ApiError(CoreError::not_found(uri.path()))
}

async fn unmatched_method(method: Method, uri: Uri) -> ApiError {
    ApiError(CoreError::bad_value(format!(
        "method {method} not allowed for {}",
        uri.path()
    )))
}

/// Installs `translate_errors` on every route of `router`.
///
/// Unknown paths become `NotFound` and unsupported methods become `BadValue`,
/// so those responses are envelopes too.
pub fn with_error_translation<S>(router: Router<S>, table: Arc<HandlerTable>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .fallback(unmatched_route)
        .method_not_allowed_fallback(unmatched_method)
        .layer(axum::middleware::from_fn(move |req, next| {
            let table = Arc::clone(&table);
            async move { translate_errors(table, req, next).await }
        }))
}
