use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("too many stops to enumerate: {stops} requested, limit is {limit}")]
    CapacityExceeded { stops: usize, limit: usize },
    #[error("search cancelled")]
    Cancelled,
    /// `evaluated` is the total across all workers of the search.
    #[error("search deadline exceeded after {evaluated} permutations")]
    DeadlineExceeded { evaluated: u64 },
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("logger init failed: {0}")]
    Logger(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// True for the outcomes of an interrupted search.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded { .. })
    }
}
