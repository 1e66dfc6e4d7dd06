//! Feedback recording
//!
//! Forwards like/dislike signals to the feedback collaborator. Failures are
//! logged and handed back to the caller, which must not mark the message as
//! rated; nothing is retried.

use super::message::{Feedback, Message};
use crate::remote::{FeedbackReceipt, FeedbackSink, FeedbackSubmission, RemoteError};
use std::sync::Arc;

pub struct FeedbackRecorder {
    sink: Arc<dyn FeedbackSink>,
}

impl FeedbackRecorder {
    pub fn new(sink: Arc<dyn FeedbackSink>) -> Self {
        Self { sink }
    }

    /// Submit `signal` for `target`. `Ok` only when the collaborator accepted it.
    pub async fn record(
        &self,
        signal: Feedback,
        target: &Message,
    ) -> Result<FeedbackReceipt, RemoteError> {
        let submission = FeedbackSubmission::new(target.id.clone(), signal);

        match self.sink.submit(&submission).await {
            Ok(receipt) => {
                tracing::info!(
                    message_id = %target.id,
                    feedback = %signal,
                    status = receipt.status,
                    response = %receipt.body,
                    "Feedback recorded"
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(
                    message_id = %target.id,
                    feedback = %signal,
                    error = %e,
                    "Feedback submission failed"
                );
                Err(e)
            }
        }
    }
}
