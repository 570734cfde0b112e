//! HTTP server command
//!
//! Picks the storage engine, builds the services and runs the server.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use foosball_core::{build_services, CoreConfig, StorageEngine};
use foosball_server::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
///
/// Storage settings come from `DB_ENGINE`, `DATABASE_URL`,
/// `DB_MAX_CONNECTIONS` and `PAGE_SIZE` first; a flag given here wins.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Storage engine: IN_MEMORY or SQL [env: DB_ENGINE]
    #[arg(long)]
    pub engine: Option<StorageEngine>,

    /// Database URL, required by the SQL engine [env: DATABASE_URL]
    #[arg(long)]
    pub database_url: Option<String>,

    /// Connection pool size for the SQL engine [env: DB_MAX_CONNECTIONS]
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Page size for listings that do not name one [env: PAGE_SIZE]
    #[arg(long)]
    pub page_size: Option<u32>,
}

impl ServeArgs {
    /// Apply the flags that were given on top of `base`.
    fn core_config(&self, base: CoreConfig) -> CoreConfig {
        CoreConfig {
            engine: self.engine.unwrap_or(base.engine),
            database_url: self
                .database_url
                .clone()
                .filter(|url| !url.is_empty())
                .or(base.database_url),
            max_connections: self.max_connections.unwrap_or(base.max_connections),
            page_size: self.page_size.unwrap_or(base.page_size),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let base = CoreConfig::from_env().context("Invalid storage configuration")?;
    let core = args.core_config(base);
    tracing::info!(engine = %core.engine, "Starting foosball server on {}", args.bind);

    let services = build_services(&core)
        .await
        .with_context(|| format!("Failed to set up {} storage", core.engine))?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Run server (blocks until shutdown)
    run_server(AppState::new(services).with_page_size(core.page_size), config)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn flags_override_base_config() {
        let args = Harness::try_parse_from([
            "serve",
            "--engine",
            "sql",
            "--database-url",
            "postgres://localhost/foosball",
            "--page-size",
            "25",
        ])
        .unwrap()
        .serve;

        let core = args.core_config(CoreConfig::default());
        assert_eq!(core.engine, StorageEngine::Sql);
        assert_eq!(core.database_url.as_deref(), Some("postgres://localhost/foosball"));
        assert_eq!(core.page_size, 25);
        assert_eq!(core.max_connections, CoreConfig::default().max_connections);
    }

    #[test]
    fn missing_flags_keep_base_config() {
        let base = CoreConfig {
            engine: StorageEngine::Sql,
            database_url: Some("postgres://db/foosball".to_owned()),
            max_connections: 12,
            page_size: 40,
        };
        let args = Harness::try_parse_from(["serve"]).unwrap().serve;
        assert_eq!(args.core_config(base.clone()), base);

        let args = Harness::try_parse_from(["serve", "--max-connections", "3", "--database-url", ""])
            .unwrap()
            .serve;
        let core = args.core_config(base.clone());
        assert_eq!(core.max_connections, 3);
        assert_eq!(core.database_url, base.database_url);
    }

    #[test]
    fn unknown_engine_fails_to_parse() {
        let err = Harness::try_parse_from(["serve", "--engine", "CASSANDRA"]).unwrap_err();
        assert!(err.to_string().contains("Unsupported DB engine"));
    }
}
