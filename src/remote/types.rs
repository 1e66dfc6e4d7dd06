//! Payloads exchanged with remote collaborators

use crate::conversation::Feedback;
use serde::Serialize;

/// Successful answer from the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnswer {
    pub answer: String,
}

impl QueryAnswer {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

/// Feedback request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    /// Id of the bot message being rated
    pub interaction_id: String,
    pub feedback: Feedback,
}

impl FeedbackSubmission {
    pub fn new(interaction_id: impl Into<String>, feedback: Feedback) -> Self {
        Self {
            interaction_id: interaction_id.into(),
            feedback,
        }
    }
}

/// What the feedback endpoint answered. The body is advisory and only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackReceipt {
    pub status: u16,
    pub body: String,
}
