//! Error types for the search client.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Discriminant of a [`SearchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Transport,
    RateLimit,
    Timeout,
    AllBackendsFailed,
    Config,
}

/// Errors that can occur during search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Caller input violates a precondition.
    #[error("Invalid query: {0}")]
    Validation(String),

    /// Non-200 response or any other transport-level fault.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The endpoint answered with a status that signals throttling.
    #[error("{0}")]
    RateLimit(String),

    /// The request did not complete within the configured timeout.
    #[error("{0}")]
    Timeout(String),

    /// Every candidate backend failed; carries the last failure.
    #[error("All backends failed: {message}")]
    AllBackendsFailed {
        message: String,
        #[source]
        source: Option<Box<SearchError>>,
    },

    /// Client could not be constructed from the given options.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl SearchError {
    /// Creates a transport error without an underlying cause.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps the last backend failure.
    pub fn all_backends_failed(last: Option<SearchError>) -> Self {
        let message = last
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "Search failed".to_string());
        Self::AllBackendsFailed {
            message,
            source: last.map(Box::new),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::RateLimit(_) => ErrorKind::RateLimit,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::AllBackendsFailed { .. } => ErrorKind::AllBackendsFailed,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.as_str().to_string())
            .unwrap_or_default();
        if err.is_timeout() {
            Self::Timeout(format!("{} request timed out", url).trim_start().to_string())
        } else {
            Self::Transport {
                message: format!("{} request failed: {}", url, err)
                    .trim_start()
                    .to_string(),
                source: Some(err),
            }
        }
    }
}
