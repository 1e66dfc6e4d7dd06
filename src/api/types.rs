//! API request and response types

use crate::conversation::{Feedback, Message};
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Result of a chat send
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// One of `ignored`, `rule`, `remote`, `fallback`
    pub outcome: &'static str,
    /// Bot reply appended by this send
    pub message: Option<Message>,
}

/// Request to rate a bot message
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: Feedback,
}

/// Response for fire-and-forget actions
#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub queued: bool,
}

/// Version info
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
