//! Entity services - the operation surface the HTTP layer calls
//!
//! One generic service per entity wraps a [`Repository`]. `get_all` and
//! `search` accumulate pages with [`search::collect`]; the rest delegate.

use std::fmt;

use crate::config::StorageEngine;
use crate::error::StoreError;
use crate::models::{Challenge, Entity, Page, PageRequest, Place, Player, SortOrder};
use crate::repository::{CrudRepository, Repository};
use crate::search;
use crate::storage::Filter;

pub struct EntityService<E: Entity> {
    repository: Repository<E>,
}

pub type PlaceService = EntityService<Place>;
pub type PlayerService = EntityService<Player>;
pub type ChallengeService = EntityService<Challenge>;

impl<E: Entity> EntityService<E> {
    pub fn new(repository: Repository<E>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, draft: E::Draft) -> Result<E, StoreError> {
        let record = self.repository.create(draft).await?;
        tracing::info!(object = E::OBJECT_NAME, id = record.id(), "created");
        Ok(record)
    }

    /// All records, ascending by id, up to `page.max_result`.
    pub async fn get_all(&self, page: &PageRequest) -> Result<Page<E>, StoreError> {
        self.search(&Filter::new(), page, SortOrder::Asc).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<E>, StoreError> {
        tracing::info!(object = E::OBJECT_NAME, id, "get by id");
        self.repository.get_by_id(id).await
    }

    pub async fn update(&self, id: &str, update: E::Update) -> Result<Option<E>, StoreError> {
        let updated = self.repository.update(id, update).await?;
        tracing::info!(
            object = E::OBJECT_NAME,
            id,
            found = updated.is_some(),
            "updated"
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let deleted = self.repository.delete(id).await?;
        tracing::info!(object = E::OBJECT_NAME, id, deleted, "deleted");
        Ok(deleted)
    }

    pub async fn search(
        &self,
        filter: &Filter,
        page: &PageRequest,
        order: SortOrder,
    ) -> Result<Page<E>, StoreError> {
        let found = search::collect(&self.repository, filter, page, order).await?;
        tracing::info!(
            object = E::OBJECT_NAME,
            filter_fields = filter.len(),
            count = found.len(),
            %order,
            "search"
        );
        Ok(found)
    }
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

/// The three services sharing one storage engine
#[derive(Clone)]
pub struct FoosballServices {
    pub challenges: ChallengeService,
    pub places: PlaceService,
    pub players: PlayerService,
    pub engine: StorageEngine,
}

impl fmt::Debug for FoosballServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoosballServices")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}
