//! Remote collaborators
//!
//! The answer service that handles input no rule matched, and the endpoint
//! that records like/dislike feedback. Both sit behind traits so the
//! conversation controller can be driven by mocks in tests.

mod error;
mod http;
mod types;

#[allow(unused_imports)] // Public API re-exports
pub use error::{RemoteError, RemoteErrorKind};
pub use http::{HttpFeedbackService, HttpQueryService};
pub use types::{FeedbackReceipt, FeedbackSubmission, QueryAnswer};

use async_trait::async_trait;
use std::sync::Arc;

/// Client for the remote answer service
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Ask the service to answer `prompt`
    async fn query(&self, prompt: &str) -> Result<QueryAnswer, RemoteError>;

    /// Where queries are sent (for logs)
    fn endpoint(&self) -> &str;
}

/// Destination for feedback signals
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// Submit one signal. `Ok` means the collaborator accepted it.
    async fn submit(&self, submission: &FeedbackSubmission) -> Result<FeedbackReceipt, RemoteError>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: QueryClient + ?Sized> QueryClient for Arc<T> {
    async fn query(&self, prompt: &str) -> Result<QueryAnswer, RemoteError> {
        (**self).query(prompt).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

#[async_trait]
impl<T: FeedbackSink + ?Sized> FeedbackSink for Arc<T> {
    async fn submit(&self, submission: &FeedbackSubmission) -> Result<FeedbackReceipt, RemoteError> {
        (**self).submit(submission).await
    }
}

/// Logging wrapper for query clients
pub struct LoggingQueryClient {
    inner: Arc<dyn QueryClient>,
}

impl LoggingQueryClient {
    pub fn new(inner: Arc<dyn QueryClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl QueryClient for LoggingQueryClient {
    async fn query(&self, prompt: &str) -> Result<QueryAnswer, RemoteError> {
        let start = std::time::Instant::now();
        let result = self.inner.query(prompt).await;
        let duration = start.elapsed();

        match &result {
            Ok(answer) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    answer_len = answer.answer.len(),
                    "Remote query completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    status = ?e.status,
                    transient = e.kind.is_transient(),
                    "Remote query failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
