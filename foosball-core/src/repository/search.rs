//! Search sub-repository over any storage adapter

use std::sync::Arc;

use async_trait::async_trait;

use super::SearchRepository;
use crate::error::StoreError;
use crate::models::{Entity, Page, PageRequest, SortOrder};
use crate::storage::{Filter, QueryOptions, StorageAdapter};

/// Fetches one cursor page per call.
///
/// A page holds at most `min(pageSize, maxResult)` records. When it is full
/// the id of its last record becomes `nextToken`; a short page ends the data.
pub struct AdapterSearchRepository<E: Entity> {
    adapter: Arc<dyn StorageAdapter<E>>,
}

impl<E: Entity> AdapterSearchRepository<E> {
    pub fn new(adapter: Arc<dyn StorageAdapter<E>>) -> Self {
        Self { adapter }
    }
}

impl<E: Entity> Clone for AdapterSearchRepository<E> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
        }
    }
}

#[async_trait]
impl<E: Entity> SearchRepository<E> for AdapterSearchRepository<E> {
    async fn search(
        &self,
        filter: &Filter,
        page: &PageRequest,
        order: SortOrder,
    ) -> Result<Page<E>, StoreError> {
        let take = page.take();
        if take == 0 {
            return Ok(Page::empty());
        }

        let options = QueryOptions {
            limit: Some(take),
            order,
            after: page.next_token.clone(),
        };
        let results = self.adapter.find_all(filter, &options).await?;
        let object = self.adapter.object_name();
        tracing::info!(object, count = results.len(), "{}s fetched", object);

        let next_token = if results.len() == take {
            results.last().map(|record| record.id().to_owned())
        } else {
            None
        };

        Ok(Page {
            results,
            next_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expertise, Player};
    use crate::storage::{to_document, MemoryAdapter};
    use serde_json::json;

    async fn players(count: usize) -> (AdapterSearchRepository<Player>, Vec<String>) {
        let adapter = Arc::new(MemoryAdapter::<Player>::new());
        let mut ids = Vec::new();
        for i in 0..count {
            let document = to_document(&json!({
                "name": format!("player-{i}"),
                "expertise": if i % 2 == 0 { Expertise::Novice } else { Expertise::Expert },
                "points": i,
            }))
            .unwrap();
            ids.push(adapter.create(document).await.unwrap());
        }
        ids.sort();
        (AdapterSearchRepository::new(adapter), ids)
    }

    #[tokio::test]
    async fn full_page_carries_token() {
        let (repo, ids) = players(5).await;

        let page = repo
            .search(&Filter::new(), &PageRequest::new(2, 10), SortOrder::Asc)
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page.next_token.as_deref(), Some(ids[1].as_str()));
    }

    #[tokio::test]
    async fn short_page_ends_data() {
        let (repo, ids) = players(5).await;

        let page = repo
            .search(
                &Filter::new(),
                &PageRequest::new(2, 10).with_token(ids[2].clone()),
                SortOrder::Asc,
            )
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.next_token.as_deref(), Some(ids[4].as_str()));

        let last = repo
            .search(
                &Filter::new(),
                &PageRequest::new(2, 10).with_token(ids[4].clone()),
                SortOrder::Asc,
            )
            .await
            .unwrap();
        assert!(last.is_empty());
        assert!(last.next_token.is_none());
    }

    #[tokio::test]
    async fn page_is_capped_by_max_result() {
        let (repo, _) = players(5).await;

        let page = repo
            .search(&Filter::new(), &PageRequest::new(10, 3), SortOrder::Asc)
            .await
            .unwrap();
        assert_eq!(page.len(), 3);
    }

    #[tokio::test]
    async fn zero_take_is_empty() {
        let (repo, _) = players(3).await;

        for request in [PageRequest::new(0, 10), PageRequest::new(10, 0)] {
            let page = repo
                .search(&Filter::new(), &request, SortOrder::Asc)
                .await
                .unwrap();
            assert!(page.is_empty());
            assert!(page.next_token.is_none());
        }
    }

    #[tokio::test]
    async fn filter_applies_before_paging() {
        let (repo, _) = players(6).await;
        let filter = to_document(&json!({ "expertise": "EXPERT" })).unwrap();

        let page = repo
            .search(&filter, &PageRequest::new(10, 10), SortOrder::Desc)
            .await
            .unwrap();

        assert_eq!(page.len(), 3);
        assert!(page.results.iter().all(|p| p.expertise == Expertise::Expert));
        assert!(page.results.windows(2).all(|w| w[0].id > w[1].id));
    }
}
