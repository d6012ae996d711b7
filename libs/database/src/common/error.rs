/// Error type for connecting to and probing the database
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver-level error (bad URI, network, auth, ...)
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Connection could not be verified
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

impl DatabaseError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// A malformed connection string will never parse, so there is no point
    /// retrying it; network and server-selection failures are transient.
    pub fn is_transient(&self) -> bool {
        match self {
            #[cfg(feature = "mongodb")]
            DatabaseError::Mongo(e) => !matches!(
                *e.kind,
                mongodb::error::ErrorKind::InvalidArgument { .. }
                    | mongodb::error::ErrorKind::Authentication { .. }
            ),
            DatabaseError::ConnectionFailed(_) | DatabaseError::HealthCheckFailed(_) => true,
        }
    }
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
