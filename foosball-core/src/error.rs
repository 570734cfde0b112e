//! Error types for foosball-core
//!
//! Library errors are `thiserror` enums; the binary wraps them in `anyhow`.

use thiserror::Error;

/// Boxed cause kept on wrapped backend failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a storage, repository or service operation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required record does not exist
    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// A create derived an id that is already taken
    #[error("{resource} with id '{id}' already exists")]
    AlreadyExists { resource: &'static str, id: String },

    /// Backend failure remapped to a display message; the cause is kept
    #[error("{message}")]
    Operation {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn already_exists(resource: &'static str, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            resource,
            id: id.into(),
        }
    }

    pub fn operation(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Operation {
            message: message.into(),
            source: source.into(),
        }
    }
}

/// Startup configuration failure. Always fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unsupported DB engine: {0}")]
    UnsupportedEngine(String),

    #[error("DATABASE_URL is required for the SQL engine")]
    MissingDatabaseUrl,

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("database setup failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// One entry of an error remapping table.
///
/// The first entry whose `matches` accepts the backend error decides the
/// display message of the resulting [`StoreError::Operation`].
#[derive(Debug, Clone, Copy)]
pub struct ErrorMapping {
    pub matches: fn(&sqlx::Error) -> bool,
    pub message: &'static str,
}

/// Matches errors reported by the database itself (constraints, FK, ...)
pub fn is_database_error(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(_))
}

/// Matches any error
pub fn any_error(_: &sqlx::Error) -> bool {
    true
}

/// Wrap a backend call result, remapping its failure through `mappings`.
///
/// Mapped failures become [`StoreError::Operation`] with the original error
/// as source. Unmapped failures are logged and surface as
/// [`StoreError::Database`].
pub fn remap<T>(
    operation: &'static str,
    args: &str,
    mappings: &[ErrorMapping],
    result: Result<T, sqlx::Error>,
) -> Result<T, StoreError> {
    result.map_err(|err| {
        let inner = err.to_string().replace('\n', "");
        match mappings.iter().find(|mapping| (mapping.matches)(&err)) {
            Some(mapping) => {
                tracing::error!(
                    operation,
                    args,
                    inner = %inner,
                    display = mapping.message,
                    "backend operation failed"
                );
                StoreError::operation(format!("{} '{}'", mapping.message, args), err)
            }
            None => {
                tracing::error!(operation, args, inner = %inner, "couldn't map backend error");
                StoreError::Database(err)
            }
        }
    })
}
