//! Player repository

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{insert_and_load, AdapterSearchRepository, CrudRepository, Repository, SearchRepository};
use crate::error::StoreError;
use crate::models::{Page, PageRequest, Player, PlayerDraft, PlayerUpdate, SortOrder};
use crate::storage::{to_document, Filter, StorageAdapter};

pub struct PlayerCrudRepository {
    adapter: Arc<dyn StorageAdapter<Player>>,
    search: AdapterSearchRepository<Player>,
}

impl PlayerCrudRepository {
    pub fn new(adapter: Arc<dyn StorageAdapter<Player>>) -> Self {
        Self {
            search: AdapterSearchRepository::new(Arc::clone(&adapter)),
            adapter,
        }
    }
}

#[async_trait]
impl CrudRepository<Player> for PlayerCrudRepository {
    async fn get_all(&self, page: &PageRequest) -> Result<Page<Player>, StoreError> {
        self.search.search(&Filter::new(), page, SortOrder::Asc).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Player>, StoreError> {
        self.adapter.find_by_id(id).await
    }

    async fn create(&self, draft: PlayerDraft) -> Result<Player, StoreError> {
        let points = draft.points.unwrap_or(0);
        let mut document = to_document(&draft)?;
        document.insert("points".to_owned(), Value::from(points));
        insert_and_load(self.adapter.as_ref(), document).await
    }

    async fn update(&self, id: &str, update: PlayerUpdate) -> Result<Option<Player>, StoreError> {
        let patch = to_document(&update)?;
        self.adapter.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.adapter.delete(id).await
    }
}

impl Repository<Player> {
    /// Player repository over one adapter.
    pub fn for_players(adapter: Arc<dyn StorageAdapter<Player>>) -> Self {
        Self::new(
            Arc::new(PlayerCrudRepository::new(Arc::clone(&adapter))),
            Arc::new(AdapterSearchRepository::new(adapter)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expertise;
    use crate::storage::MemoryAdapter;

    #[tokio::test]
    async fn points_default_to_zero() {
        let repo = Repository::for_players(Arc::new(MemoryAdapter::<Player>::new()));
        let player = repo
            .create(PlayerDraft {
                name: "Alice".to_owned(),
                expertise: Expertise::Novice,
                points: None,
            })
            .await
            .unwrap();

        assert_eq!(player.points, 0);
        assert!(player.id.starts_with("player_"));
    }

    #[tokio::test]
    async fn explicit_points_are_kept_and_updated() {
        let repo = Repository::for_players(Arc::new(MemoryAdapter::<Player>::new()));
        let player = repo
            .create(PlayerDraft {
                name: "Bob".to_owned(),
                expertise: Expertise::Expert,
                points: Some(42),
            })
            .await
            .unwrap();
        assert_eq!(player.points, 42);

        let updated = repo
            .update(
                &player.id,
                PlayerUpdate {
                    points: Some(50),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.points, 50);
        assert_eq!(updated.expertise, Expertise::Expert);
    }

    #[tokio::test]
    async fn update_missing_is_none() {
        let repo = Repository::for_players(Arc::new(MemoryAdapter::<Player>::new()));
        let result = repo
            .update("player_missing", PlayerUpdate::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
