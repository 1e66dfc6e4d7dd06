//! Remote collaborator error types

use thiserror::Error;

/// Remote call error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub message: String,
    /// HTTP status, when the service answered at all
    pub status: Option<u16>,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Network, message)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            kind: RemoteErrorKind::Status,
            message: format!("HTTP {status}: {body}"),
            status: Some(status),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Decode, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Unknown, message)
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// Connection failures, timeouts, truncated bodies
    Network,
    /// Service answered with a non-success status
    Status,
    /// Body was not the expected JSON shape
    Decode,
    /// Anything else reqwest reports
    Unknown,
}

impl RemoteErrorKind {
    /// Whether retrying the same call later could succeed
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Network)
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RemoteError::network(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            RemoteError::network(format!("Connection failed: {e}"))
        } else if e.is_body() {
            RemoteError::network(format!("Failed to read response: {e}"))
        } else {
            RemoteError::unknown(format!("Request failed: {e}"))
        }
    }
}
