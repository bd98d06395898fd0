use core_config::ConfigError;

/// Connector-level error
///
/// Raised while building or verifying a connection, before any collection is
/// touched. Query-time driver errors are mapped by the domain crates instead.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
