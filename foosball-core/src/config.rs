//! Core configuration read from the environment

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::db::DEFAULT_MAX_CONNECTIONS;
use crate::error::ConfigError;
use crate::models::pagination::DEFAULT_PAGE_SIZE;

/// Storage backend named by `DB_ENGINE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageEngine {
    InMemory,
    Sql,
    /// Recognised but not available in this build
    DynamoDb,
    /// Recognised but not available in this build
    MongoDb,
}

impl StorageEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InMemory => "IN_MEMORY",
            Self::Sql => "SQL",
            Self::DynamoDb => "DYNAMODB",
            Self::MongoDb => "MONGODB",
        }
    }
}

impl fmt::Display for StorageEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageEngine {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN_MEMORY" => Ok(Self::InMemory),
            "SQL" => Ok(Self::Sql),
            "DYNAMODB" => Ok(Self::DynamoDb),
            "MONGODB" => Ok(Self::MongoDb),
            _ => Err(ConfigError::UnsupportedEngine(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub engine: StorageEngine,
    /// Required when `engine` is `Sql`
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Default page size for listings
    pub page_size: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            engine: StorageEngine::InMemory,
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CoreConfig {
    /// Read `DB_ENGINE`, `DATABASE_URL`, `DB_MAX_CONNECTIONS` and `PAGE_SIZE`.
    ///
    /// Unset variables fall back to defaults; set but unparsable ones fail.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let engine = match lookup("DB_ENGINE") {
            Some(raw) => raw.parse()?,
            None => defaults.engine,
        };

        Ok(Self {
            engine,
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            max_connections: parse_number(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            page_size: parse_number(&lookup, "PAGE_SIZE", defaults.page_size)?,
        })
    }
}

fn parse_number(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: u32,
) -> Result<u32, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}
