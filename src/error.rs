/// Domain-specific error types for the auction service.
#[derive(Debug, thiserror::Error)]
pub enum AuctionError {
    #[error("auction not found: {0}")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("transport failed: {0}")]
    Transport(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias.
pub type AuctionResult<T> = Result<T, AuctionError>;
