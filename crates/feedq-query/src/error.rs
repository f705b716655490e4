use feedq_store::StoreError;

/// Errors from query operations.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// A top-k operation was asked for a non-positive number of results.
    /// Rejected before any store contact.
    #[error("limit must be positive, got {0}")]
    InvalidLimit(i64),

    /// The underlying store access failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for query operations.
pub type QueryResult<T> = Result<T, QueryError>;
