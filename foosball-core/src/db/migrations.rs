//! Schema for the document tables

use sqlx::PgPool;

use crate::models::{Challenge, Entity, Place, Player};

/// Tables created at startup, one per entity collection
pub const TABLES: [&str; 3] = [Place::TABLE, Player::TABLE, Challenge::TABLE];

fn create_table_sql(table: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id TEXT PRIMARY KEY,
            body JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#
    )
}

/// Run all migrations. Idempotent.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running foosball migrations...");

    for table in TABLES {
        sqlx::query(&create_table_sql(table)).execute(pool).await?;
    }

    tracing::info!(tables = TABLES.len(), "Migrations complete");
    Ok(())
}
