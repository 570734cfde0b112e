//! Volatile in-process adapter
//!
//! Ids are `<object>_<8 hex>` from a sha256 of the record name, so two
//! records with the same name collide by construction.

use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use super::{matches_filter, to_document, Document, Filter, QueryOptions, StorageAdapter};
use crate::error::StoreError;
use crate::models::{Entity, SortOrder};

/// Number of hex characters kept from the name digest
const ID_SUFFIX_LEN: usize = 8;

/// In-memory collection. The lock serialises writers of one collection.
pub struct MemoryAdapter<T> {
    records: RwLock<BTreeMap<String, T>>,
}

impl<T: Entity> MemoryAdapter<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<T: Entity> Default for MemoryAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the id for a new record from its name (or the clock when unnamed).
fn derive_id(object_name: &str, document: &Document) -> String {
    let seed = document
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| Utc::now().timestamp_millis().to_string());

    let digest = hex::encode(Sha256::digest(seed.as_bytes()));
    format!(
        "{}_{}",
        object_name.to_lowercase(),
        &digest[..ID_SUFFIX_LEN]
    )
}

#[async_trait]
impl<T: Entity> StorageAdapter<T> for MemoryAdapter<T> {
    async fn create(&self, mut document: Document) -> Result<String, StoreError> {
        let id = derive_id(T::OBJECT_NAME, &document);
        document.insert("id".to_owned(), Value::String(id.clone()));
        let record: T = serde_json::from_value(Value::Object(document))?;

        let mut records = self.records.write().await;
        if records.contains_key(&id) {
            return Err(StoreError::already_exists(T::OBJECT_NAME, id));
        }
        records.insert(id.clone(), record);

        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn find_all(&self, filter: &Filter, options: &QueryOptions) -> Result<Vec<T>, StoreError> {
        let records = self.records.read().await;
        let after = options.after.as_deref();

        let candidates: Box<dyn Iterator<Item = &T> + '_> = match (options.order, after) {
            (SortOrder::Asc, Some(after)) => Box::new(
                records
                    .range::<str, _>((Bound::Excluded(after), Bound::Unbounded))
                    .map(|(_, record)| record),
            ),
            (SortOrder::Asc, None) => Box::new(records.values()),
            (SortOrder::Desc, Some(after)) => Box::new(
                records
                    .range::<str, _>((Bound::Unbounded, Bound::Excluded(after)))
                    .rev()
                    .map(|(_, record)| record),
            ),
            (SortOrder::Desc, None) => Box::new(records.values().rev()),
        };

        let limit = options.limit.unwrap_or(usize::MAX);
        let mut results = Vec::new();
        for record in candidates {
            if results.len() >= limit {
                break;
            }
            if filter.is_empty() || matches_filter(&to_document(record)?, filter) {
                results.push(record.clone());
            }
        }

        Ok(results)
    }

    async fn update(&self, id: &str, patch: Document) -> Result<Option<T>, StoreError> {
        let mut records = self.records.write().await;
        let Some(existing) = records.get(id) else {
            return Ok(None);
        };

        let mut merged = to_document(existing)?;
        merged.extend(patch.into_iter().filter(|(key, _)| key != "id"));
        let updated: T = serde_json::from_value(Value::Object(merged))?;
        records.insert(id.to_owned(), updated.clone());

        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.records.write().await.remove(id).is_some())
    }
}
