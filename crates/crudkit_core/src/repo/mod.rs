//! Repository layer contracts and persistence implementations.
//!
//! # Responsibility
//! - Define read and transactional data-access contracts per entity type.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Storage failures are classified here and nowhere else.
//! - A failed write never leaves an open transaction behind.
//!
//! # See also
//! - `crate::error::classify_storage_error`

use crate::entity::{Entity, EntityId};
use crate::error::CoreResult;
use serde_json::{Map, Value};

pub mod sqlite;

pub use sqlite::SqliteRepository;

/// Read operations over the entity type bound at construction.
pub trait Readable {
    type Entity: Entity;

    /// Point lookup; `Ok(None)` when no row has `id`.
    fn get(&self, id: EntityId) -> CoreResult<Option<Self::Entity>>;
    /// Offset/limit range lookup ordered by `id`.
    fn get_multi(&self, skip: u32, limit: u32) -> CoreResult<Vec<Self::Entity>>;
}

/// Write operations; every write refreshes from storage.
pub trait Transactional: Readable {
    /// Builds the draft from `obj_in`, inserts it and returns the stored row.
    fn create(&self, obj_in: &Map<String, Value>) -> CoreResult<Self::Entity>;
    /// Applies `patch` and refreshes `db_obj` from storage.
    fn update(
        &self,
        db_obj: &mut Self::Entity,
        patch: &<Self::Entity as Entity>::Patch,
    ) -> CoreResult<()>;
    fn delete(&self, db_obj: Self::Entity) -> CoreResult<()>;
}

/// Full CRUD contract; implemented for anything transactional.
pub trait Repository: Transactional {}

impl<T: Transactional> Repository for T {}
