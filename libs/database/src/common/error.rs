use std::sync::Arc;

/// Unified database error type
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// MongoDB driver errors
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Connection could not be established
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Failure of a connection attempt made through a
/// [`ConnectionCache`](super::ConnectionCache).
///
/// Cloneable so every caller that joined the same in-flight attempt
/// receives the same error. Retryable: the cache is already reset by the
/// time this is returned.
#[derive(Debug, Clone, thiserror::Error)]
#[error("database connection unavailable: {source}")]
pub struct ConnectionError {
    source: Arc<DatabaseError>,
}

impl ConnectionError {
    /// The underlying transport/driver error
    pub fn cause(&self) -> &DatabaseError {
        &self.source
    }
}

impl From<DatabaseError> for ConnectionError {
    fn from(err: DatabaseError) -> Self {
        Self {
            source: Arc::new(err),
        }
    }
}
