//! Core use-case services.
//!
//! # Responsibility
//! - Sit between a router and a repository.
//! - Turn "no such row" into a `NotFound` error carrying the requested id.
//!
//! # Invariants
//! - Services never classify storage failures; repository errors pass through unchanged.

use crate::entity::{Entity, EntityId};
use crate::error::CoreResult;
use crate::query::QueryParams;
use serde_json::{Map, Value};

pub mod crud_service;

pub use crud_service::CrudService;

/// CRUD use-case contract for one entity type.
pub trait Service {
    type Entity: Entity;

    fn create_item(&self, body: &Map<String, Value>) -> CoreResult<Self::Entity>;
    fn fetch_item(&self, item_id: EntityId) -> CoreResult<Self::Entity>;
    fn fetch_many_items(&self, query: &QueryParams) -> CoreResult<Vec<Self::Entity>>;
    /// Applies `patch` and returns the refreshed entity.
    fn update_item(
        &self,
        item_id: EntityId,
        patch: &<Self::Entity as Entity>::Patch,
    ) -> CoreResult<Self::Entity>;
    fn delete_item(&self, item_id: EntityId) -> CoreResult<()>;
}
