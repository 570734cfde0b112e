//! Service factory - picks the storage engine once at startup

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::{CoreConfig, StorageEngine};
use crate::db::{connect, migrations};
use crate::error::ConfigError;
use crate::models::{Challenge, Place, Player};
use crate::repository::Repository;
use crate::service::{EntityService, FoosballServices};
use crate::storage::{MemoryAdapter, PgAdapter, StorageAdapter};

/// Build the services for the configured engine.
///
/// # Errors
///
/// - `UnsupportedEngine` for engines this build cannot serve
/// - `MissingDatabaseUrl` when `Sql` is selected without a URL
/// - `Database` when the pool or schema setup fails
pub async fn build_services(config: &CoreConfig) -> Result<FoosballServices, ConfigError> {
    match config.engine {
        StorageEngine::InMemory => {
            tracing::info!(engine = %config.engine, "using volatile storage");
            Ok(in_memory())
        }
        StorageEngine::Sql => {
            let url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::MissingDatabaseUrl)?;
            let pool = connect(url, config.max_connections).await?;
            migrations::run(&pool).await?;
            tracing::info!(
                engine = %config.engine,
                max_connections = config.max_connections,
                "connected to database"
            );
            Ok(postgres(pool))
        }
        StorageEngine::DynamoDb | StorageEngine::MongoDb => {
            Err(ConfigError::UnsupportedEngine(config.engine.to_string()))
        }
    }
}

/// Services over fresh in-memory collections.
pub fn in_memory() -> FoosballServices {
    wire(
        Arc::new(MemoryAdapter::<Challenge>::new()),
        Arc::new(MemoryAdapter::<Place>::new()),
        Arc::new(MemoryAdapter::<Player>::new()),
        StorageEngine::InMemory,
    )
}

/// Services over an already migrated pool.
pub fn postgres(pool: PgPool) -> FoosballServices {
    wire(
        Arc::new(PgAdapter::<Challenge>::new(pool.clone())),
        Arc::new(PgAdapter::<Place>::new(pool.clone())),
        Arc::new(PgAdapter::<Player>::new(pool)),
        StorageEngine::Sql,
    )
}

fn wire(
    challenges: Arc<dyn StorageAdapter<Challenge>>,
    places: Arc<dyn StorageAdapter<Place>>,
    players: Arc<dyn StorageAdapter<Player>>,
    engine: StorageEngine,
) -> FoosballServices {
    FoosballServices {
        challenges: EntityService::new(Repository::for_challenges(
            challenges,
            Arc::clone(&places),
            Arc::clone(&players),
        )),
        places: EntityService::new(Repository::for_places(places)),
        players: EntityService::new(Repository::for_players(players)),
        engine,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_engine_builds() {
        let services = build_services(&CoreConfig::default()).await.unwrap();
        assert_eq!(services.engine, StorageEngine::InMemory);
    }

    #[tokio::test]
    async fn unavailable_engines_are_rejected() {
        for engine in [StorageEngine::DynamoDb, StorageEngine::MongoDb] {
            let config = CoreConfig {
                engine,
                ..Default::default()
            };
            let err = build_services(&config).await.unwrap_err();
            assert_eq!(err.to_string(), format!("Unsupported DB engine: {engine}"));
        }
    }

    #[tokio::test]
    async fn sql_without_url_fails() {
        let config = CoreConfig {
            engine: StorageEngine::Sql,
            ..Default::default()
        };
        let err = build_services(&config).await.unwrap_err();
        assert!(matches!(err, ConfigError::MissingDatabaseUrl));
    }
}
