//! Mock LLM provider for deterministic testing.
//!
//! Returns pre-configured responses without making any HTTP calls.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::provider::*;
use journal_core::{JournalError, Message, Result};

/// A mock LLM provider that returns pre-configured responses in order.
///
/// # Example
/// ```
/// use journal_llm::mock::MockProvider;
/// let provider = MockProvider::new("test")
///     .with_json(serde_json::json!({ "skillUpskilled": "Prompt Engineering" }));
/// ```
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Track all requests received (for assertions in tests).
    requests: Arc<Mutex<Vec<LlmRequest>>>,
    name: String,
}

/// A pre-configured response from the mock provider.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub text: String,
    pub stop_reason: StopReason,
    pub usage: Usage,
    /// If set, the provider will return this error instead.
    pub error: Option<String>,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            text: String::new(),
            stop_reason: StopReason::EndTurn,
            usage: Usage {
                input_tokens: 100,
                output_tokens: 50,
                estimated_cost_usd: 0.0,
            },
            error: None,
        }
    }
}

impl MockResponse {
    /// Create a text response.
    pub fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    /// Create a response whose text is the given JSON value.
    pub fn json(value: serde_json::Value) -> Self {
        Self {
            text: value.to_string(),
            ..Default::default()
        }
    }

    /// Create an error response.
    pub fn error(msg: &str) -> Self {
        Self {
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(vec![])),
            name: name.into(),
        }
    }

    /// Queue a simple text response.
    pub fn with_response(self, text: &str) -> Self {
        self.with_mock_response(MockResponse::text(text))
    }

    /// Queue a JSON response.
    pub fn with_json(self, value: serde_json::Value) -> Self {
        self.with_mock_response(MockResponse::json(value))
    }

    /// Queue an error response.
    pub fn with_error(self, error: &str) -> Self {
        self.with_mock_response(MockResponse::error(error))
    }

    /// Queue a fully custom response.
    pub fn with_mock_response(self, resp: MockResponse) -> Self {
        self.responses.lock().push_back(resp);
        self
    }

    /// Shared handle to every request made to this provider.
    pub fn recorded_requests(&self) -> Arc<Mutex<Vec<LlmRequest>>> {
        Arc::clone(&self.requests)
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Pop the next queued response. An exhausted queue yields an empty reply.
    fn next_response(&self) -> MockResponse {
        self.responses.lock().pop_front().unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn models(&self) -> Vec<String> {
        vec!["mock/test-model".to_string()]
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        self.requests.lock().push(request.clone());
        let mock = self.next_response();

        if let Some(error) = mock.error {
            return Err(JournalError::LlmProvider(error));
        }

        Ok(LlmResponse {
            message: Message::assistant(mock.text),
            usage: mock.usage,
            stop_reason: mock.stop_reason,
        })
    }
}
