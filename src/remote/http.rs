//! HTTP implementations of the remote collaborators
//!
//! Queries are posted as `multipart/form-data` with a single `prompt` field;
//! the service answers `{"result": {"output": "..."}}`. Feedback is posted as
//! JSON.

use super::types::{FeedbackReceipt, FeedbackSubmission, QueryAnswer};
use super::{FeedbackSink, QueryClient, RemoteError};
use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::Client;
use serde::Deserialize;

/// Remote answer service over HTTP
pub struct HttpQueryService {
    client: Client,
    url: String,
}

impl HttpQueryService {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl QueryClient for HttpQueryService {
    async fn query(&self, prompt: &str) -> Result<QueryAnswer, RemoteError> {
        let form = Form::new().text("prompt", prompt.to_string());

        let response = self.client.post(&self.url).multipart(form).send().await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(RemoteError::status(status.as_u16(), &body));
        }

        parse_answer(&body)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponseBody {
    result: QueryResult,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    output: String,
}

/// Extract `result.output` from a success body
fn parse_answer(body: &str) -> Result<QueryAnswer, RemoteError> {
    let parsed: QueryResponseBody = serde_json::from_str(body)
        .map_err(|e| RemoteError::decode(format!("Failed to parse response: {e} - body: {body}")))?;
    Ok(QueryAnswer::new(parsed.result.output))
}

/// Feedback endpoint over HTTP
pub struct HttpFeedbackService {
    client: Client,
    url: String,
}

impl HttpFeedbackService {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl FeedbackSink for HttpFeedbackService {
    async fn submit(&self, submission: &FeedbackSubmission) -> Result<FeedbackReceipt, RemoteError> {
        let response = self.client.post(&self.url).json(submission).send().await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(RemoteError::status(status.as_u16(), &body));
        }

        Ok(FeedbackReceipt {
            status: status.as_u16(),
            body,
        })
    }
}
