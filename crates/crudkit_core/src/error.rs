//! Closed failure taxonomy for the data-access layer.
//!
//! # Responsibility
//! - Name the six failure categories a CRUD call chain can surface.
//! - Own the fixed `(status, label, message prefix)` triple of every kind.
//!
//! # Invariants
//! - The kind set is closed; every kind maps to exactly one status and label.
//! - A `CoreError` is never reclassified after it is raised.
//! - `Display` renders only the carried cause, which may be empty.

use http::StatusCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CoreResult<T> = Result<T, CoreError>;

/// Failure category recognized at the translation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller supplied an invalid value.
    BadValue,
    /// Requested resource does not exist.
    NotFound,
    /// Uniqueness rule violated at the service level.
    Duplicated,
    /// Unexpected internal failure, e.g. input could not be parsed into the model.
    InternalServerError,
    /// Any storage failure that is not an integrity violation.
    DatabaseError,
    /// Storage rejected the write for integrity reasons.
    DatabaseIntegrityError,
}

impl ErrorKind {
    /// All kinds in handler registration order.
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::BadValue,
        ErrorKind::NotFound,
        ErrorKind::Duplicated,
        ErrorKind::InternalServerError,
        ErrorKind::DatabaseError,
        ErrorKind::DatabaseIntegrityError,
    ];

    pub fn status(self) -> StatusCode {
        match self {
            Self::BadValue => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Duplicated => StatusCode::BAD_REQUEST,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::DatabaseError => StatusCode::BAD_REQUEST,
            Self::DatabaseIntegrityError => StatusCode::BAD_REQUEST,
        }
    }

    /// Short machine-readable tag emitted as `error.type`.
    pub fn label(self) -> &'static str {
        match self {
            Self::BadValue => "BadValueErr",
            Self::NotFound => "NotFound",
            Self::Duplicated => "DuplicatedEntry",
            Self::InternalServerError => "UnknownErr",
            Self::DatabaseError => "DatabaseErr",
            Self::DatabaseIntegrityError => "DatabaseIntegrityErr",
        }
    }

    /// Human-readable prefix of `error.message`.
    pub fn message_prefix(self) -> &'static str {
        match self {
            Self::BadValue => "Bad Value error",
            Self::NotFound => "Not found",
            Self::Duplicated => "Duplicated entry",
            Self::InternalServerError => "Unknown error",
            Self::DatabaseError => "Database error",
            Self::DatabaseIntegrityError => "Database Integrity error",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Typed failure raised by repositories and services.
///
/// Each variant carries the stringified cause. An empty cause is valid and
/// yields a prefix-only message once translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    BadValue(String),
    NotFound(String),
    Duplicated(String),
    InternalServerError(String),
    DatabaseError(String),
    DatabaseIntegrityError(String),
}

impl CoreError {
    /// Builds the variant for `kind`.
    pub fn from_kind(kind: ErrorKind, cause: impl Into<String>) -> Self {
        let cause = cause.into();
        match kind {
            ErrorKind::BadValue => Self::BadValue(cause),
            ErrorKind::NotFound => Self::NotFound(cause),
            ErrorKind::Duplicated => Self::Duplicated(cause),
            ErrorKind::InternalServerError => Self::InternalServerError(cause),
            ErrorKind::DatabaseError => Self::DatabaseError(cause),
            ErrorKind::DatabaseIntegrityError => Self::DatabaseIntegrityError(cause),
        }
    }

    pub fn bad_value(cause: impl Into<String>) -> Self {
        Self::BadValue(cause.into())
    }

    pub fn not_found(cause: impl Into<String>) -> Self {
        Self::NotFound(cause.into())
    }

    pub fn duplicated(cause: impl Into<String>) -> Self {
        Self::Duplicated(cause.into())
    }

    pub fn internal(cause: impl Into<String>) -> Self {
        Self::InternalServerError(cause.into())
    }

    pub fn database(cause: impl Into<String>) -> Self {
        Self::DatabaseError(cause.into())
    }

    pub fn database_integrity(cause: impl Into<String>) -> Self {
        Self::DatabaseIntegrityError(cause.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadValue(_) => ErrorKind::BadValue,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Duplicated(_) => ErrorKind::Duplicated,
            Self::InternalServerError(_) => ErrorKind::InternalServerError,
            Self::DatabaseError(_) => ErrorKind::DatabaseError,
            Self::DatabaseIntegrityError(_) => ErrorKind::DatabaseIntegrityError,
        }
    }

    /// Stringified cause, possibly empty.
    pub fn detail(&self) -> &str {
        match self {
            Self::BadValue(cause)
            | Self::NotFound(cause)
            | Self::Duplicated(cause)
            | Self::InternalServerError(cause)
            | Self::DatabaseError(cause)
            | Self::DatabaseIntegrityError(cause) => cause,
        }
    }
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.detail())
    }
}

impl Error for CoreError {}

/// Classifies a storage-engine failure.
///
/// SQLite constraint violations (unique, foreign key, not null, check) become
/// `DatabaseIntegrityError`; every other engine failure becomes `DatabaseError`.
pub fn classify_storage_error(err: &rusqlite::Error) -> CoreError {
    match err.sqlite_error_code() {
        Some(rusqlite::ErrorCode::ConstraintViolation) => {
            CoreError::DatabaseIntegrityError(err.to_string())
        }
        _ => CoreError::DatabaseError(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_storage_error, CoreError, ErrorKind};
    use http::StatusCode;
    use rusqlite::Connection;
    use std::collections::HashSet;

    #[test]
    fn every_kind_has_a_distinct_label() {
        let labels = ErrorKind::ALL
            .iter()
            .map(|kind| kind.label())
            .collect::<HashSet<_>>();
        assert_eq!(labels.len(), ErrorKind::ALL.len());
    }

    #[test]
    fn only_internal_server_error_maps_to_500() {
        for kind in ErrorKind::ALL {
            let expected_500 = kind == ErrorKind::InternalServerError;
            assert_eq!(
                kind.status() == StatusCode::INTERNAL_SERVER_ERROR,
                expected_500,
                "{kind}"
            );
        }
        assert_eq!(ErrorKind::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn from_kind_roundtrips_through_kind() {
        for kind in ErrorKind::ALL {
            let err = CoreError::from_kind(kind, "cause");
            assert_eq!(err.kind(), kind);
            assert_eq!(err.detail(), "cause");
        }
    }

    #[test]
    fn display_renders_only_the_cause() {
        assert_eq!(CoreError::not_found("42").to_string(), "42");
        assert_eq!(CoreError::bad_value("").to_string(), "");
        assert_eq!(CoreError::duplicated("sku").kind(), ErrorKind::Duplicated);
    }

    #[test]
    fn unique_violation_is_classified_as_integrity_error() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE);
             INSERT INTO t (name) VALUES ('a');",
        )
        .unwrap();

        let err = conn
            .execute("INSERT INTO t (name) VALUES ('a');", [])
            .unwrap_err();
        let classified = classify_storage_error(&err);
        assert_eq!(classified.kind(), ErrorKind::DatabaseIntegrityError);
        assert!(classified.detail().contains("UNIQUE"));
    }

    #[test]
    fn other_engine_failures_are_classified_as_database_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn
            .execute("INSERT INTO missing_table (x) VALUES (1);", [])
            .unwrap_err();
        assert_eq!(
            classify_storage_error(&err).kind(),
            ErrorKind::DatabaseError
        );
    }
}
