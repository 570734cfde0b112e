//! Bounded accumulation over cursor pages
//!
//! A single backend page holds at most `pageSize` records. [`collect`] keeps
//! asking for the next page until the backend runs out, `maxResult` records
//! have been gathered, or a page comes back empty.

use crate::error::StoreError;
use crate::models::{Entity, Page, PageRequest, SortOrder};
use crate::repository::SearchRepository;
use crate::storage::Filter;

/// Gather up to `page.max_result` records matching `filter`.
///
/// The returned token resumes after the last collected record, or is `None`
/// when the backend reported no more data.
pub async fn collect<E, R>(
    repo: &R,
    filter: &Filter,
    page: &PageRequest,
    order: SortOrder,
) -> Result<Page<E>, StoreError>
where
    E: Entity,
    R: SearchRepository<E> + ?Sized,
{
    if page.page_size == 0 || page.max_result == 0 {
        return Ok(Page::empty());
    }

    let cap = page.max_result as usize;
    let mut results: Vec<E> = Vec::new();
    let mut token = page.next_token.clone();

    loop {
        let remaining = cap - results.len();
        let request = PageRequest {
            page_size: page.page_size.min(remaining as u32),
            max_result: remaining as u32,
            next_token: token.take(),
        };

        let batch = repo.search(filter, &request, order).await?;
        let fetched = batch.results.len();
        results.extend(batch.results);
        token = batch.next_token;

        tracing::debug!(
            object = E::OBJECT_NAME,
            fetched,
            total = results.len(),
            more = token.is_some(),
            "page collected"
        );

        // An empty page with a token would never make progress
        if token.is_none() || results.len() >= cap || fetched == 0 {
            break;
        }
    }

    results.truncate(cap);

    Ok(Page {
        results,
        next_token: token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expertise, Player};
    use crate::repository::AdapterSearchRepository;
    use crate::storage::{to_document, MemoryAdapter, StorageAdapter};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts backend calls and can be told to return empty pages with a token.
    struct Counting {
        inner: AdapterSearchRepository<Player>,
        calls: AtomicUsize,
        stall: bool,
    }

    #[async_trait]
    impl SearchRepository<Player> for Counting {
        async fn search(
            &self,
            filter: &Filter,
            page: &PageRequest,
            order: SortOrder,
        ) -> Result<Page<Player>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.stall {
                return Ok(Page {
                    results: Vec::new(),
                    next_token: Some("player_stuck".to_owned()),
                });
            }
            self.inner.search(filter, page, order).await
        }
    }

    async fn counting(count: usize, stall: bool) -> Counting {
        let adapter = Arc::new(MemoryAdapter::<Player>::new());
        for i in 0..count {
            adapter
                .create(
                    to_document(&json!({
                        "name": format!("p{i:03}"),
                        "expertise": Expertise::Intermediate,
                        "points": i,
                    }))
                    .unwrap(),
                )
                .await
                .unwrap();
        }
        Counting {
            inner: AdapterSearchRepository::new(adapter),
            calls: AtomicUsize::new(0),
            stall,
        }
    }

    #[tokio::test]
    async fn collects_across_pages_up_to_cap() {
        let repo = counting(10, false).await;

        let page = collect(&repo, &Filter::new(), &PageRequest::new(3, 7), SortOrder::Asc)
            .await
            .unwrap();

        assert_eq!(page.len(), 7);
        assert!(page.next_token.is_some());
        assert_eq!(repo.calls.load(Ordering::SeqCst), 3);

        let ids: HashSet<_> = page.results.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), 7);
        assert!(page.results.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn returns_everything_when_under_cap() {
        let repo = counting(5, false).await;

        let page = collect(&repo, &Filter::new(), &PageRequest::new(2, 100), SortOrder::Desc)
            .await
            .unwrap();

        assert_eq!(page.len(), 5);
        assert!(page.next_token.is_none());
        assert!(page.results.windows(2).all(|w| w[0].id > w[1].id));
    }

    #[tokio::test]
    async fn resumes_from_token() {
        let repo = counting(6, false).await;
        let first = collect(&repo, &Filter::new(), &PageRequest::new(2, 4), SortOrder::Asc)
            .await
            .unwrap();
        let token = first.next_token.clone().unwrap();

        let rest = collect(
            &repo,
            &Filter::new(),
            &PageRequest::new(2, 4).with_token(token),
            SortOrder::Asc,
        )
        .await
        .unwrap();

        assert_eq!(rest.len(), 2);
        assert!(rest.results[0].id > first.results[3].id);
    }

    #[tokio::test]
    async fn zero_sizes_skip_backend() {
        let repo = counting(3, false).await;

        for request in [PageRequest::new(0, 10), PageRequest::new(10, 0)] {
            let page = collect(&repo, &Filter::new(), &request, SortOrder::Asc)
                .await
                .unwrap();
            assert!(page.is_empty());
            assert!(page.next_token.is_none());
        }
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_page_stops_loop() {
        let repo = counting(0, true).await;

        let page = collect(&repo, &Filter::new(), &PageRequest::new(5, 50), SortOrder::Asc)
            .await
            .unwrap();

        assert!(page.is_empty());
        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
    }
}
