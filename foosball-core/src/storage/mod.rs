//! Storage adapters - one collection per adapter instance
//!
//! Both backends honour the same contract so repositories never know which
//! one they run on:
//! - `create` derives the id and fails with AlreadyExists on collision
//! - `find_by_id`, `update` return `None` for missing records, never an error
//! - `find_all` rebuilds its result from the collection on every call
//! - `update` is a shallow merge of top-level fields

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::models::{Entity, SortOrder};

pub use memory::MemoryAdapter;
pub use postgres::PgAdapter;

/// Partial record as a JSON object
pub type Document = serde_json::Map<String, Value>;

/// Exact-match filter over top-level fields. Empty matches everything.
///
/// Each filter value must equal the whole stored field. Numbers compare by
/// value (`1` equals `1.0`); objects and arrays compare element by element.
pub type Filter = Document;

/// Options for `find_all`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub limit: Option<usize>,
    pub order: SortOrder,
    /// Only records strictly after this id, in `order` direction
    pub after: Option<String>,
}

#[async_trait]
pub trait StorageAdapter<T: Entity>: Send + Sync {
    /// Display name of the collection
    fn object_name(&self) -> &'static str {
        T::OBJECT_NAME
    }

    async fn create(&self, document: Document) -> Result<String, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError>;

    async fn find_all(&self, filter: &Filter, options: &QueryOptions) -> Result<Vec<T>, StoreError>;

    async fn update(&self, id: &str, patch: Document) -> Result<Option<T>, StoreError>;

    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// Serialize a value that must be a JSON object.
pub fn to_document<S: Serialize + ?Sized>(value: &S) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Serialization(serde::ser::Error::custom(
            format!("expected a JSON object, got {}", other),
        ))),
    }
}

/// True when every filter field equals the record's field.
pub fn matches_filter(record: &Document, filter: &Filter) -> bool {
    filter.iter().all(|(key, expected)| {
        record
            .get(key)
            .is_some_and(|actual| values_equal(actual, expected))
    })
}

/// JSON equality with numbers compared by value, as PostgreSQL `jsonb = jsonb` does.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}
