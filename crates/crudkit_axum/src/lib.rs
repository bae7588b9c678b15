//! axum transport adapter for `crudkit_core`.
//!
//! # Responsibility
//! - Carry `CoreError` values out of handlers to a single translation layer.
//! - Apply the configured default page size to list queries.
//! - Serialize success results and translated errors as envelopes.
//!
//! # Invariants
//! - Every `ApiError` a handler returns leaves the router as a failed `ResponseEnvelope`.
//! - The handler table is shared read-only; the layer never mutates it.

mod error;
mod layer;
mod query;
mod response;

pub use error::{ApiError, ApiResult};
pub use layer::{error_response, translate_errors, with_error_translation};
pub use query::{with_query_defaults, ListQuery, QueryDefaults};
pub use response::Envelope;
