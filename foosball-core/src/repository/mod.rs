//! Repositories - per-entity data access over storage adapters
//!
//! Each entity gets a [`Repository`] facade composing:
//! - a CRUD sub-repository (single-record lifecycle, reference resolution)
//! - a search sub-repository (one cursor page per call)
//!
//! Both halves are trait objects so either can be swapped independently.

pub mod challenge;
pub mod place;
pub mod player;
pub mod search;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Entity, Page, PageRequest, SortOrder};
use crate::storage::{Document, Filter, StorageAdapter};

pub use challenge::ChallengeCrudRepository;
pub use place::PlaceCrudRepository;
pub use player::PlayerCrudRepository;
pub use search::AdapterSearchRepository;

/// Single-record lifecycle operations
#[async_trait]
pub trait CrudRepository<E: Entity>: Send + Sync {
    /// One page of all records, ascending by id.
    async fn get_all(&self, page: &PageRequest) -> Result<Page<E>, StoreError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<E>, StoreError>;

    async fn create(&self, draft: E::Draft) -> Result<E, StoreError>;

    /// `None` when no record has this id.
    async fn update(&self, id: &str, update: E::Update) -> Result<Option<E>, StoreError>;

    /// `true` iff a record was removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// Bulk reads, one backend page per call
#[async_trait]
pub trait SearchRepository<E: Entity>: Send + Sync {
    async fn search(
        &self,
        filter: &Filter,
        page: &PageRequest,
        order: SortOrder,
    ) -> Result<Page<E>, StoreError>;
}

/// Facade implementing both halves by delegation
pub struct Repository<E: Entity> {
    crud: Arc<dyn CrudRepository<E>>,
    search: Arc<dyn SearchRepository<E>>,
}

impl<E: Entity> Repository<E> {
    pub fn new(crud: Arc<dyn CrudRepository<E>>, search: Arc<dyn SearchRepository<E>>) -> Self {
        Self { crud, search }
    }
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            crud: Arc::clone(&self.crud),
            search: Arc::clone(&self.search),
        }
    }
}

#[async_trait]
impl<E: Entity> CrudRepository<E> for Repository<E> {
    async fn get_all(&self, page: &PageRequest) -> Result<Page<E>, StoreError> {
        self.crud.get_all(page).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<E>, StoreError> {
        self.crud.get_by_id(id).await
    }

    async fn create(&self, draft: E::Draft) -> Result<E, StoreError> {
        self.crud.create(draft).await
    }

    async fn update(&self, id: &str, update: E::Update) -> Result<Option<E>, StoreError> {
        self.crud.update(id, update).await
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.crud.delete(id).await
    }
}

#[async_trait]
impl<E: Entity> SearchRepository<E> for Repository<E> {
    async fn search(
        &self,
        filter: &Filter,
        page: &PageRequest,
        order: SortOrder,
    ) -> Result<Page<E>, StoreError> {
        self.search.search(filter, page, order).await
    }
}

/// Store a new record and read it back.
pub(crate) async fn insert_and_load<E: Entity>(
    adapter: &dyn StorageAdapter<E>,
    document: Document,
) -> Result<E, StoreError> {
    let id = adapter.create(document).await?;
    adapter
        .find_by_id(&id)
        .await?
        .ok_or_else(|| StoreError::not_found(E::OBJECT_NAME, id))
}

/// Look up a referenced record, failing with NotFound when it is missing.
pub(crate) async fn resolve<E: Entity>(
    adapter: &dyn StorageAdapter<E>,
    id: &str,
) -> Result<E, StoreError> {
    adapter
        .find_by_id(id)
        .await?
        .ok_or_else(|| StoreError::not_found(E::OBJECT_NAME, id))
}
