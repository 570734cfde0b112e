//! Place repository

use std::sync::Arc;

use async_trait::async_trait;

use super::{insert_and_load, AdapterSearchRepository, CrudRepository, Repository, SearchRepository};
use crate::error::StoreError;
use crate::models::{Page, PageRequest, Place, PlaceDraft, PlaceStatus, PlaceUpdate, SortOrder};
use crate::storage::{to_document, Filter, StorageAdapter};

/// New places wait for verification.
const INITIAL_STATUS: PlaceStatus = PlaceStatus::Unverified;

pub struct PlaceCrudRepository {
    adapter: Arc<dyn StorageAdapter<Place>>,
    search: AdapterSearchRepository<Place>,
}

impl PlaceCrudRepository {
    pub fn new(adapter: Arc<dyn StorageAdapter<Place>>) -> Self {
        Self {
            search: AdapterSearchRepository::new(Arc::clone(&adapter)),
            adapter,
        }
    }
}

#[async_trait]
impl CrudRepository<Place> for PlaceCrudRepository {
    async fn get_all(&self, page: &PageRequest) -> Result<Page<Place>, StoreError> {
        self.search.search(&Filter::new(), page, SortOrder::Asc).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Place>, StoreError> {
        self.adapter.find_by_id(id).await
    }

    async fn create(&self, draft: PlaceDraft) -> Result<Place, StoreError> {
        let mut document = to_document(&draft)?;
        document.insert("status".to_owned(), serde_json::to_value(INITIAL_STATUS)?);
        insert_and_load(self.adapter.as_ref(), document).await
    }

    async fn update(&self, id: &str, update: PlaceUpdate) -> Result<Option<Place>, StoreError> {
        let patch = to_document(&update)?;
        self.adapter.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.adapter.delete(id).await
    }
}

impl Repository<Place> {
    /// Place repository over one adapter.
    pub fn for_places(adapter: Arc<dyn StorageAdapter<Place>>) -> Self {
        Self::new(
            Arc::new(PlaceCrudRepository::new(Arc::clone(&adapter))),
            Arc::new(AdapterSearchRepository::new(adapter)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use crate::storage::MemoryAdapter;
    use serde_json::Value;

    fn repo() -> Repository<Place> {
        Repository::for_places(Arc::new(MemoryAdapter::<Place>::new()))
    }

    fn draft(name: &str) -> PlaceDraft {
        PlaceDraft {
            name: name.to_owned(),
            coordinates: Coordinates {
                lat: 45.46,
                long: 9.19,
            },
        }
    }

    #[tokio::test]
    async fn create_starts_unverified() {
        let repo = repo();
        let place = repo.create(draft("Bar Sport")).await.unwrap();

        assert_eq!(place.status, PlaceStatus::Unverified);
        assert_eq!(repo.get_by_id(&place.id).await.unwrap(), Some(place));
    }

    #[tokio::test]
    async fn update_touches_only_given_fields() {
        let repo = repo();
        let place = repo.create(draft("Bar Sport")).await.unwrap();

        let updated = repo
            .update(
                &place.id,
                PlaceUpdate {
                    status: Some(PlaceStatus::Active),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, PlaceStatus::Active);
        assert_eq!(updated.name, "Bar Sport");
        assert_eq!(updated.coordinates, place.coordinates);
    }

    #[tokio::test]
    async fn get_all_is_one_page() {
        let repo = repo();
        for name in ["a", "b", "c"] {
            repo.create(draft(name)).await.unwrap();
        }

        let page = repo.get_all(&PageRequest::new(2, 10)).await.unwrap();
        assert_eq!(page.len(), 2);
        assert!(page.next_token.is_some());
    }

    #[tokio::test]
    async fn status_filter_uses_wire_literal() {
        let repo = repo();
        repo.create(draft("a")).await.unwrap();

        let mut filter = Filter::new();
        filter.insert("status".to_owned(), Value::String("UNVERIFIED".to_owned()));
        let page = repo
            .search(&filter, &PageRequest::default(), SortOrder::Asc)
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
    }
}
