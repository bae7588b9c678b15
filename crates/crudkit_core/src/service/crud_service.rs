//! Generic CRUD service over any repository.

use crate::entity::{Entity, EntityId};
use crate::error::{CoreError, CoreResult};
use crate::query::QueryParams;
use crate::repo::Repository;
use crate::service::Service;
use log::debug;
use serde_json::{Map, Value};

/// Use-case service wrapper for entity CRUD operations.
pub struct CrudService<R: Repository> {
    repo: R,
}

impl<R: Repository> CrudService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn require(&self, item_id: EntityId) -> CoreResult<R::Entity> {
        match self.repo.get(item_id)? {
            Some(entity) => Ok(entity),
            None => {
                debug!(
                    "event=item_lookup module=service status=not_found table={} id={}",
                    <R::Entity as Entity>::TABLE,
                    item_id
                );
                Err(CoreError::not_found(item_id.to_string()))
            }
        }
    }
}

impl<R: Repository> Service for CrudService<R> {
    type Entity = R::Entity;

    fn create_item(&self, body: &Map<String, Value>) -> CoreResult<R::Entity> {
        self.repo.create(body)
    }

    fn fetch_item(&self, item_id: EntityId) -> CoreResult<R::Entity> {
        self.require(item_id)
    }

    /// `query.q` is not interpreted here.
    fn fetch_many_items(&self, query: &QueryParams) -> CoreResult<Vec<R::Entity>> {
        self.repo.get_multi(query.skip, query.limit)
    }

    fn update_item(
        &self,
        item_id: EntityId,
        patch: &<R::Entity as Entity>::Patch,
    ) -> CoreResult<R::Entity> {
        let mut entity = self.require(item_id)?;
        self.repo.update(&mut entity, patch)?;
        Ok(entity)
    }

    fn delete_item(&self, item_id: EntityId) -> CoreResult<()> {
        let entity = self.require(item_id)?;
        self.repo.delete(entity)
    }
}
