use async_trait::async_trait;
use journal_core::{JournalError, Message, Result};
use tracing::debug;

use crate::provider::*;

/// Ollama provider. Talks to the native `/api/chat` endpoint of a local server.
pub struct OllamaProvider {
    client: reqwest::Client,
    /// API root of the server, including `/api` (e.g. "http://localhost:11434/api")
    base_url: String,
    model_name: String,
}

impl OllamaProvider {
    pub fn new(base_url: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model_name: model_name.into(),
        }
    }

    /// Default local Ollama instance
    pub fn local(model: &str) -> Self {
        Self::new("http://localhost:11434/api", model)
    }
}

/// Build the `/api/chat` request body.
pub(crate) fn build_body(request: &LlmRequest) -> serde_json::Value {
    let mut body = serde_json::json!({
        "model": &request.model,
        "messages": request.wire_messages(),
        "stream": false,
        "options": {
            "temperature": request.temperature,
            "num_predict": request.max_tokens,
        }
    });

    // Ollama accepts a JSON Schema directly as the `format` value.
    if let Some(ref schema) = request.response_schema {
        body["format"] = schema.schema.clone();
    }

    body
}

/// Turn an `/api/chat` reply into an [`LlmResponse`].
pub(crate) fn parse_response(data: &serde_json::Value) -> Result<LlmResponse> {
    if let Some(err) = data["error"].as_str() {
        return Err(JournalError::LlmProvider(format!("ollama: {err}")));
    }

    let content = data["message"]["content"]
        .as_str()
        .unwrap_or("")
        .to_string();

    Ok(LlmResponse {
        message: Message::assistant(content),
        usage: Usage {
            input_tokens: data["prompt_eval_count"].as_u64().unwrap_or(0) as u32,
            output_tokens: data["eval_count"].as_u64().unwrap_or(0) as u32,
            estimated_cost_usd: 0.0, // Local = free
        },
        stop_reason: match data["done_reason"].as_str() {
            Some("length") => StopReason::MaxTokens,
            _ => StopReason::EndTurn,
        },
    })
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn models(&self) -> Vec<String> {
        vec![self.model_name.clone()]
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        let body = build_body(request);
        debug!(model = %request.model, url = %self.base_url, "sending ollama chat");

        let resp = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| JournalError::LlmProvider(format!("ollama: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(JournalError::LlmProvider(format!(
                "ollama HTTP {status}: {text}"
            )));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| JournalError::LlmProvider(e.to_string()))?;

        parse_response(&data)
    }
}
