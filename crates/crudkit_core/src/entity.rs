//! Stored-entity contract shared by repositories and services.
//!
//! # Responsibility
//! - Describe how an entity maps onto one table keyed by `id`.
//! - Provide the shape validator used by create paths.
//!
//! # Invariants
//! - `COLUMNS` lists the select order expected by `from_row`, `id` included.
//! - A patch yields only the fields it changes; an empty patch writes nothing.

use crate::error::{CoreError, CoreResult};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

/// Integer primary key stored in the `id` column.
pub type EntityId = i64;

/// Column assignments produced by drafts and patches.
pub type FieldValues = Vec<(&'static str, Value)>;

/// Field-name to value mapping for an insert or a partial update.
pub trait Fields {
    fn fields(&self) -> FieldValues;
}

/// Entity persisted in a single table.
pub trait Entity: Sized {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Shape built from raw create input; missing fields take their defaults.
    type Draft: DeserializeOwned + Fields;
    /// Explicit partial-update structure.
    type Patch: Fields;

    fn id(&self) -> EntityId;
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// Builds an entity draft from a raw attribute mapping.
///
/// # Errors
/// - Returns `InternalServerError` when the mapping does not fit `E::Draft`.
pub fn parse_draft<E: Entity>(obj_in: &Map<String, JsonValue>) -> CoreResult<E::Draft> {
    serde_json::from_value(JsonValue::Object(obj_in.clone())).map_err(|err| {
        CoreError::internal(format!(
            "unexpected error while parsing into the model: {err}"
        ))
    })
}
