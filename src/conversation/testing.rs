//! Mock collaborators for testing
//!
//! These mocks drive the controller without any network I/O.

use super::controller::ConversationController;
use crate::remote::{
    FeedbackReceipt, FeedbackSink, FeedbackSubmission, QueryAnswer, QueryClient, RemoteError,
};
use crate::rules::RuleSet;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Catalog shared by controller and API tests
pub fn test_ruleset() -> Arc<RuleSet> {
    let raw = r#"{
        "rules": [
            {
                "keywords": ["hello", "good morning"],
                "responses": [{
                    "text": "Hello! Ask me anything.",
                    "buttons": [
                        { "label": "Recommendation", "action": "recommendation" },
                        { "label": "Summarization", "action": "summarization" }
                    ]
                }]
            },
            {
                "keywords": ["help"],
                "responses": [{ "text": "Here is how to get help." }]
            }
        ]
    }"#;
    Arc::new(RuleSet::from_json(raw).unwrap())
}

/// Controller wired to fresh mocks
pub fn test_controller() -> (
    ConversationController,
    Arc<MockQueryClient>,
    Arc<MockFeedbackSink>,
) {
    let query = Arc::new(MockQueryClient::new());
    let sink = Arc::new(MockFeedbackSink::new());
    let controller = ConversationController::new(test_ruleset(), query.clone(), sink.clone());
    (controller, query, sink)
}

// ============================================================================
// Mock Query Client
// ============================================================================

/// Query client that returns queued results
#[allow(dead_code)]
pub struct MockQueryClient {
    responses: Mutex<VecDeque<Result<QueryAnswer, RemoteError>>>,
    /// Record of every prompt sent
    pub prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockQueryClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful answer
    pub fn queue_answer(&self, answer: QueryAnswer) {
        self.responses.lock().unwrap().push_back(Ok(answer));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: RemoteError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next(&self) -> Result<QueryAnswer, RemoteError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::network("No mock response queued")))
    }
}

impl Default for MockQueryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryClient for MockQueryClient {
    async fn query(&self, prompt: &str) -> Result<QueryAnswer, RemoteError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.next()
    }

    fn endpoint(&self) -> &str {
        "mock://query"
    }
}

// ============================================================================
// Gated Query Client (for observing in-flight sends)
// ============================================================================

/// Query client that blocks until the test releases it
pub struct GatedQueryClient {
    pub inner: MockQueryClient,
    /// Notified once the query is in flight
    pub request_started: Arc<Notify>,
    /// Notify to let the query complete
    pub release: Arc<Notify>,
}

impl GatedQueryClient {
    pub fn new() -> Self {
        Self {
            inner: MockQueryClient::new(),
            request_started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }

    pub fn queue_answer(&self, answer: QueryAnswer) {
        self.inner.queue_answer(answer);
    }
}

#[async_trait]
impl QueryClient for GatedQueryClient {
    async fn query(&self, prompt: &str) -> Result<QueryAnswer, RemoteError> {
        self.inner.prompts.lock().unwrap().push(prompt.to_string());
        self.request_started.notify_one();
        self.release.notified().await;
        self.inner.next()
    }

    fn endpoint(&self) -> &str {
        "mock://gated"
    }
}

// ============================================================================
// Mock Feedback Sink
// ============================================================================

/// Feedback sink that accepts (or rejects) everything and records submissions
pub struct MockFeedbackSink {
    reject: bool,
    submissions: Mutex<Vec<FeedbackSubmission>>,
}

impl MockFeedbackSink {
    pub fn new() -> Self {
        Self {
            reject: false,
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Sink whose every submission fails with HTTP 500
    pub fn failing() -> Self {
        Self {
            reject: true,
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_submissions(&self) -> Vec<FeedbackSubmission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedbackSink for MockFeedbackSink {
    async fn submit(&self, submission: &FeedbackSubmission) -> Result<FeedbackReceipt, RemoteError> {
        self.submissions.lock().unwrap().push(submission.clone());
        if self.reject {
            return Err(RemoteError::status(500, "feedback store unavailable"));
        }
        Ok(FeedbackReceipt {
            status: 200,
            body: r#"{"status": "ok"}"#.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Feedback;

    #[tokio::test]
    async fn test_mock_query_client() {
        let mock = MockQueryClient::new();
        mock.queue_answer(QueryAnswer::new("first"));

        assert_eq!(mock.query("a").await.unwrap().answer, "first");
        // Nothing left in the queue
        assert!(mock.query("b").await.is_err());
        assert_eq!(mock.recorded_prompts(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_mock_feedback_sink() {
        let ok = MockFeedbackSink::new();
        let failing = MockFeedbackSink::failing();
        let submission = FeedbackSubmission::new("id", Feedback::Up);

        assert!(ok.submit(&submission).await.is_ok());
        assert_eq!(failing.submit(&submission).await.unwrap_err().status, Some(500));
        assert_eq!(failing.recorded_submissions(), vec![submission]);
    }
}
