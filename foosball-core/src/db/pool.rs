//! Connection pool for the SQL engine
//!
//! One pool per process, shared by every `PgAdapter`.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool size when `DB_MAX_CONNECTIONS` is unset.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a request waits for a free connection
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Open a pool with the default size.
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/foosball").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    connect(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Open a pool holding at most `max_connections` (at least one).
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let max_connections = max_connections.max(1);
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;

    tracing::debug!(max_connections, "database pool open");
    Ok(pool)
}
