use feed_core::{FailureReason, Generation, Page};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        generation: Generation,
        result: Result<Page, FetchError>,
    },
}

/// Everything that can go wrong between a request URL and a parsed page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("network failure: {cause}")]
    NetworkFailure { cause: String, timed_out: bool },
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("response too large (max {max_bytes}, actual {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::NetworkFailure { timed_out: true, .. })
    }

    /// Coarse category the feed state machine reacts to.
    pub fn reason(&self) -> FailureReason {
        match self {
            FetchError::InvalidUrl(_) => FailureReason::InvalidUrl,
            FetchError::NetworkFailure { .. } | FetchError::TooLarge { .. } => {
                FailureReason::Network
            }
            FetchError::HttpStatus(code) => FailureReason::HttpStatus(*code),
            FetchError::MalformedResponse(_) => FailureReason::MalformedResponse,
        }
    }
}

/// Failure to bring up the engine itself.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
