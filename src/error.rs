use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrackError {
    /// Malformed digest, bad alphabet, non-positive length or a search space
    /// that cannot be indexed.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Candidate index past the end of the search space.
    #[error("index {index} out of range for search space of {size} candidates")]
    IndexOutOfRange { index: u64, size: u64 },

    /// Engine configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// A worker stopped on an internal failure. Fatal for the search.
    #[error("worker error: {0}")]
    Worker(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch all for unexpected internal problems.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CrackError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        CrackError::InvalidParameters(msg.into())
    }
}
