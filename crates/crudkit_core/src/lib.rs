//! Core contracts for CRUD-style HTTP services over a relational store.
//! This crate owns the error taxonomy, the response envelope and the
//! repository/service layering every service built on it shares.

pub mod config;
pub mod db;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod query;
pub mod repo;
pub mod service;
pub mod translate;

pub use config::{ConfigError, CoreConfig};
pub use entity::{parse_draft, Entity, EntityId, FieldValues, Fields};
pub use envelope::{ErrorPayload, ResponseEnvelope};
pub use error::{classify_storage_error, CoreError, CoreResult, ErrorKind};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use query::QueryParams;
pub use repo::{Readable, Repository, SqliteRepository, Transactional};
pub use service::{CrudService, Service};
pub use translate::{build_message, ErrorHandler, ErrorResponse, HandlerTable, RequestInfo};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
