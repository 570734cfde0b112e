//! PostgreSQL adapter - one JSONB document table per entity
//!
//! - create: INSERT ... ON CONFLICT DO NOTHING, zero rows means the id is taken
//! - find_all: `body -> key = value` per filter field, keyset on id for the cursor
//! - update: `body || patch` is the shallow merge
//!
//! Ids are `<prefix>_<unix millis>`. Within one process the millis are
//! bumped so no two ids repeat.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{Document, Filter, QueryOptions, StorageAdapter};
use crate::error::{any_error, is_database_error, remap, ErrorMapping, StoreError};
use crate::models::{Entity, SortOrder};

const CREATE_MAPPINGS: &[ErrorMapping] = &[
    ErrorMapping {
        matches: is_database_error,
        message: "Cannot create resource",
    },
    ErrorMapping {
        matches: any_error,
        message: "Unknown error while creating resource",
    },
];

const UPDATE_MAPPINGS: &[ErrorMapping] = &[
    ErrorMapping {
        matches: is_database_error,
        message: "Cannot update resource",
    },
    ErrorMapping {
        matches: any_error,
        message: "Unknown error while updating resource",
    },
];

const DELETE_MAPPINGS: &[ErrorMapping] = &[
    ErrorMapping {
        matches: is_database_error,
        message: "Cannot delete resource",
    },
    ErrorMapping {
        matches: any_error,
        message: "Unknown error while deleting resource",
    },
];

/// Adapter over the table named by `T::TABLE`.
///
/// Holds a clone of the shared pool; opening and closing the pool is the
/// caller's job.
pub struct PgAdapter<T> {
    pool: PgPool,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> PgAdapter<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn mint_id() -> String {
        format!("{}_{}", T::ID_PREFIX, next_millis())
    }
}

/// Last millisecond value handed out by `next_millis`
static LAST_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Current unix millis, or one past the last value issued if the clock has
/// not moved on.
fn next_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_MILLIS.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_MILLIS.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(seen) => last = seen,
        }
    }
}

fn decode<T: Entity>(body: Value) -> Result<T, StoreError> {
    Ok(serde_json::from_value(body)?)
}

#[async_trait]
impl<T: Entity> StorageAdapter<T> for PgAdapter<T> {
    async fn create(&self, mut document: Document) -> Result<String, StoreError> {
        let id = Self::mint_id();
        document.insert("id".to_owned(), Value::String(id.clone()));
        let body = Value::Object(document);

        // Reject incomplete records before they reach the table
        T::deserialize(&body)?;

        let sql = format!(
            "INSERT INTO {} (id, body) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING",
            T::TABLE
        );
        let result = remap(
            "create",
            &id,
            CREATE_MAPPINGS,
            sqlx::query(&sql)
                .bind(&id)
                .bind(Json(body))
                .execute(&self.pool)
                .await,
        )?;

        if result.rows_affected() == 0 {
            return Err(StoreError::already_exists(T::OBJECT_NAME, id));
        }

        tracing::debug!(object = T::OBJECT_NAME, %id, "record inserted");
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let sql = format!("SELECT body FROM {} WHERE id = $1", T::TABLE);
        let row: Option<(Json<Value>,)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|(Json(body),)| decode(body)).transpose()
    }

    async fn find_all(&self, filter: &Filter, options: &QueryOptions) -> Result<Vec<T>, StoreError> {
        let mut query =
            QueryBuilder::<Postgres>::new(format!("SELECT body FROM {} WHERE TRUE", T::TABLE));

        // jsonb equality: whole-value match, numbers by value
        for (key, value) in filter {
            query.push(" AND body -> ");
            query.push_bind(key.clone());
            query.push(" = ");
            query.push_bind(Json(value.clone()));
        }

        if let Some(after) = &options.after {
            query.push(match options.order {
                SortOrder::Asc => r#" AND id COLLATE "C" > "#,
                SortOrder::Desc => r#" AND id COLLATE "C" < "#,
            });
            query.push_bind(after.clone());
        }

        query.push(match options.order {
            SortOrder::Asc => r#" ORDER BY id COLLATE "C" ASC"#,
            SortOrder::Desc => r#" ORDER BY id COLLATE "C" DESC"#,
        });

        if let Some(limit) = options.limit {
            query.push(" LIMIT ");
            query.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows: Vec<(Json<Value>,)> = query.build_query_as().fetch_all(&self.pool).await?;
        tracing::debug!(object = T::OBJECT_NAME, count = rows.len(), "records fetched");

        rows.into_iter().map(|(Json(body),)| decode(body)).collect()
    }

    async fn update(&self, id: &str, mut patch: Document) -> Result<Option<T>, StoreError> {
        patch.remove("id");

        let sql = format!(
            "UPDATE {} SET body = body || $2, updated_at = NOW() WHERE id = $1 RETURNING body",
            T::TABLE
        );
        let row: Option<(Json<Value>,)> = remap(
            "update",
            id,
            UPDATE_MAPPINGS,
            sqlx::query_as(&sql)
                .bind(id)
                .bind(Json(Value::Object(patch)))
                .fetch_optional(&self.pool)
                .await,
        )?;

        row.map(|(Json(body),)| decode(body)).transpose()
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        let result = remap(
            "delete",
            id,
            DELETE_MAPPINGS,
            sqlx::query(&sql).bind(id).execute(&self.pool).await,
        )?;

        Ok(result.rows_affected() > 0)
    }
}
