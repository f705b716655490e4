/// Errors from parsing or converting model types.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// The string is not a valid 24-character hex object identifier.
    #[error("invalid object id: {0:?}")]
    InvalidId(String),
}
