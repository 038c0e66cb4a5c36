//! Error types for GitHub API calls
//!
//! Two families: validation failures raised before any request is sent,
//! and transport failures surfaced unchanged from the request executor.

/// Result alias used by every API operation
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error returned by API operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// True if the call was rejected locally without reaching the network
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// HTTP status code, if the failure was a non-success response
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Caller errors detected before a request is made
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("thread id is required")]
    MissingThreadId,
    #[error("both user and repo are required to scope to a repository")]
    PartialRepoScope,
    #[error("invalid boolean for '{key}': {value}")]
    InvalidBool { key: String, value: String },
    #[error("invalid ISO-8601 timestamp for '{key}': {value}")]
    InvalidTimestamp { key: String, value: String },
}

/// Failures raised while performing or decoding a request
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("GitHub API returned status {status} for {path}")]
    Status { status: u16, path: String },
    #[error("Failed to send request to {path}")]
    Request {
        path: String,
        #[source]
        source: ureq::Error,
    },
    #[error("Invalid request URL: {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to decode response from {path}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
