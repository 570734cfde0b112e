//! Challenge repository
//!
//! Challenges reference a place, an owner and participants by id on input.
//! All references are resolved before anything is written; the resolved
//! records are embedded in the stored challenge.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;

use super::{
    insert_and_load, resolve, AdapterSearchRepository, CrudRepository, Repository, SearchRepository,
};
use crate::error::StoreError;
use crate::models::{
    Challenge, ChallengeDraft, ChallengeUpdate, Page, PageRequest, Place, Player, SortOrder,
};
use crate::storage::{Document, Filter, StorageAdapter};

pub struct ChallengeCrudRepository {
    challenges: Arc<dyn StorageAdapter<Challenge>>,
    places: Arc<dyn StorageAdapter<Place>>,
    players: Arc<dyn StorageAdapter<Player>>,
    search: AdapterSearchRepository<Challenge>,
}

impl ChallengeCrudRepository {
    pub fn new(
        challenges: Arc<dyn StorageAdapter<Challenge>>,
        places: Arc<dyn StorageAdapter<Place>>,
        players: Arc<dyn StorageAdapter<Player>>,
    ) -> Self {
        Self {
            search: AdapterSearchRepository::new(Arc::clone(&challenges)),
            challenges,
            places,
            players,
        }
    }

    async fn resolve_place(&self, id: &str) -> Result<Place, StoreError> {
        resolve(self.places.as_ref(), id).await
    }

    async fn resolve_player(&self, id: &str) -> Result<Player, StoreError> {
        resolve(self.players.as_ref(), id).await
    }

    async fn resolve_players(&self, ids: &[String]) -> Result<Vec<Player>, StoreError> {
        try_join_all(ids.iter().map(|id| self.resolve_player(id))).await
    }
}

fn put(document: &mut Document, key: &str, value: impl serde::Serialize) -> Result<(), StoreError> {
    document.insert(key.to_owned(), serde_json::to_value(value)?);
    Ok(())
}

#[async_trait]
impl CrudRepository<Challenge> for ChallengeCrudRepository {
    async fn get_all(&self, page: &PageRequest) -> Result<Page<Challenge>, StoreError> {
        self.search.search(&Filter::new(), page, SortOrder::Asc).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Challenge>, StoreError> {
        self.challenges.find_by_id(id).await
    }

    async fn create(&self, draft: ChallengeDraft) -> Result<Challenge, StoreError> {
        let place = self.resolve_place(&draft.place_id).await?;
        let owner = self.resolve_player(&draft.owner_id).await?;
        let players = match &draft.players_id {
            Some(ids) => self.resolve_players(ids).await?,
            None => Vec::new(),
        };

        let mut document = Document::new();
        document.insert("name".to_owned(), Value::String(draft.name));
        put(&mut document, "place", &place)?;
        put(&mut document, "status", draft.status.unwrap_or_default())?;
        put(&mut document, "date", draft.date)?;
        put(&mut document, "time", draft.time)?;
        put(&mut document, "owner", &owner)?;
        put(&mut document, "players", &players)?;

        let challenge = insert_and_load(self.challenges.as_ref(), document).await?;
        tracing::debug!(id = %challenge.id, place = %place.id, owner = %owner.id, "challenge stored");
        Ok(challenge)
    }

    async fn update(
        &self,
        id: &str,
        update: ChallengeUpdate,
    ) -> Result<Option<Challenge>, StoreError> {
        if self.challenges.find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut patch = Document::new();
        if let Some(name) = update.name {
            patch.insert("name".to_owned(), Value::String(name));
        }
        if let Some(place_id) = &update.place_id {
            put(&mut patch, "place", self.resolve_place(place_id).await?)?;
        }
        if let Some(owner_id) = &update.owner_id {
            put(&mut patch, "owner", self.resolve_player(owner_id).await?)?;
        }
        if let Some(ids) = &update.players_id {
            put(&mut patch, "players", self.resolve_players(ids).await?)?;
        }
        if let Some(date) = update.date {
            put(&mut patch, "date", date)?;
        }
        if let Some(time) = update.time {
            put(&mut patch, "time", time)?;
        }
        if let Some(status) = update.status {
            put(&mut patch, "status", status)?;
        }

        self.challenges.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.challenges.delete(id).await
    }
}

impl Repository<Challenge> {
    /// Challenge repository. Place and player adapters are read-only here.
    pub fn for_challenges(
        challenges: Arc<dyn StorageAdapter<Challenge>>,
        places: Arc<dyn StorageAdapter<Place>>,
        players: Arc<dyn StorageAdapter<Player>>,
    ) -> Self {
        Self::new(
            Arc::new(ChallengeCrudRepository::new(
                Arc::clone(&challenges),
                places,
                players,
            )),
            Arc::new(AdapterSearchRepository::new(challenges)),
        )
    }
}
