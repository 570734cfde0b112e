//! Database layer - connection pool and schema
//!
//! One JSONB document table per entity; the table layout is owned by
//! `migrations`, the row format by `storage::postgres`.

pub mod migrations;
pub mod pool;

pub use pool::{connect, create_pool, DEFAULT_MAX_CONNECTIONS};
