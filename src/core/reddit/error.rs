//! Reddit gateway error types.

use thiserror::Error;

/// Result type for gateway operations.
pub type RedditResult<T> = Result<T, RedditError>;

/// Errors that can occur while talking to the Reddit API.
#[derive(Debug, Error)]
pub enum RedditError {
    /// Reddit answered with a non-success HTTP status.
    #[error("Reddit returned HTTP {status}")]
    Upstream { status: u16 },

    /// The request never produced a response (DNS, connect, timeout).
    #[error("Failed to reach Reddit: {0}")]
    Transport(String),

    /// The response was successful but its body had an unexpected shape.
    #[error("Malformed response from Reddit: {0}")]
    MalformedResponse(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl RedditError {
    /// Create a malformed response error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// The upstream status code, if this is an upstream error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RedditError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
