use std::time::Duration;

/// Failure while talking to the content backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("network error: {0}")]
    Transport(String),
    #[error("backend returned HTTP {status}")]
    Status { status: u16 },
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// Whether a manual retry of the same request may succeed.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Transport(_) => true,
            Self::Status { status } => *status == 408 || *status == 429 || *status >= 500,
            Self::InvalidResponse(_) => false,
        }
    }
}

/// Failure while loading a detail view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetailError {
    #[error("content `{0}` not found")]
    NotFound(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
