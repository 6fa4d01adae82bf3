use lode_types::ChunkRef;

/// Errors from chunk fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// No chunk is stored under the requested ref.
    #[error("chunk not found: {0}")]
    NotFound(ChunkRef),

    /// The ref cannot name a chunk in this backend (e.g. contains a path
    /// separator in a file-backed store).
    #[error("invalid ref: {0}")]
    InvalidRef(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote or transport-level failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Result alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;
