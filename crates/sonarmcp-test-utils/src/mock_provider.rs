// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionProvider` with scripted outcomes,
//! so dispatch paths can be tested without network access.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use sonarmcp_core::{ChatRequest, Completion, CompletionProvider, SonarError, TokenUsage};

/// One scripted outcome: message content, or an error message.
type Outcome = Result<Value, String>;

/// A mock provider that returns pre-configured outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// the text "mock response" is returned. Every request is recorded.
#[derive(Clone)]
pub struct MockProvider {
    outcomes: Arc<Mutex<VecDeque<Outcome>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty queue.
    pub fn new() -> Self {
        Self::with_outcomes(VecDeque::new())
    }

    /// Create a mock provider pre-loaded with text responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self::with_outcomes(responses.into_iter().map(|r| Ok(Value::String(r))).collect())
    }

    /// Create a mock provider whose first call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_outcomes(VecDeque::from([Err(message.into())]))
    }

    fn with_outcomes(outcomes: VecDeque<Outcome>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a text response.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.outcomes
            .lock()
            .await
            .push_back(Ok(Value::String(text.into())));
    }

    /// Queue a structured (non-string) content value.
    pub async fn add_content(&self, content: Value) {
        self.outcomes.lock().await.push_back(Ok(content));
    }

    /// Queue a provider error.
    pub async fn add_error(&self, message: impl Into<String>) {
        self.outcomes.lock().await.push_back(Err(message.into()));
    }

    /// Requests received so far, in call order.
    pub async fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().await.clone()
    }

    /// The most recent request, if any.
    pub async fn last_request(&self) -> Option<ChatRequest> {
        self.requests.lock().await.last().cloned()
    }

    async fn next_outcome(&self) -> Outcome {
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Value::String("mock response".to_string())))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    async fn complete(&self, request: ChatRequest) -> Result<Completion, SonarError> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);

        let content = self.next_outcome().await.map_err(SonarError::provider)?;
        let count = self.requests.lock().await.len();
        Ok(Completion {
            id: format!("mock-resp-{count}"),
            model,
            content,
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 20,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sonarmcp_core::ChatMessage;

    fn request(model: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user("hello")],
            model: model.to_string(),
            search: None,
            search_recency_days: None,
            response_format: None,
        }
    }

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new();
        let resp = provider.complete(request("sonar")).await.unwrap();
        assert_eq!(resp.content, json!("mock response"));
        assert_eq!(resp.model, "sonar");
    }

    #[tokio::test]
    async fn queued_responses_returned_in_order() {
        let provider = MockProvider::with_responses(vec!["first".into(), "second".into()]);
        let a = provider.complete(request("sonar")).await.unwrap();
        let b = provider.complete(request("sonar")).await.unwrap();
        let c = provider.complete(request("sonar")).await.unwrap();
        assert_eq!(a.content, json!("first"));
        assert_eq!(b.content, json!("second"));
        assert_eq!(c.content, json!("mock response"));
    }

    #[tokio::test]
    async fn queued_error_is_provider_error() {
        let provider = MockProvider::failing("rate limited");
        let err = provider.complete(request("sonar")).await.unwrap_err();
        assert!(matches!(err, SonarError::Provider { .. }));
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn records_requests() {
        let provider = MockProvider::new();
        provider.add_content(json!({"k": 1})).await;
        let resp = provider.complete(request("sonar-pro")).await.unwrap();
        assert_eq!(resp.content, json!({"k": 1}));

        let seen = provider.requests().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "sonar-pro");
        assert_eq!(provider.last_request().await.unwrap().model, "sonar-pro");
    }

    #[tokio::test]
    async fn clones_share_state() {
        let provider = MockProvider::new();
        let handle = provider.clone();
        handle.add_error("boom").await;
        assert!(provider.complete(request("sonar")).await.is_err());
        assert_eq!(handle.requests().await.len(), 1);
    }
}
