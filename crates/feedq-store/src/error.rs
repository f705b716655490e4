/// Errors from store access.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store is unreachable or failed the startup ping.
    #[error("failed to connect to store: {0}")]
    Connection(#[source] mongodb::error::Error),

    /// The server rejected or failed to execute a filter or pipeline.
    #[error("query failed: {0}")]
    Query(#[source] mongodb::error::Error),

    /// A returned document could not be mapped into its record type.
    #[error("failed to decode document: {0}")]
    Decode(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
