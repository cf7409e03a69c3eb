use async_trait::async_trait;
use journal_core::{JournalError, Message, Result};
use tracing::debug;

use crate::provider::*;

/// OpenAI-compatible API provider (works with OpenAI, Azure, Together, etc.)
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    provider_name: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: "https://api.openai.com/v1".into(),
            provider_name: "openai".into(),
        }
    }

    /// Use a custom base URL (for Azure, Together, vLLM, etc.)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Build the `/chat/completions` request body.
pub(crate) fn build_body(request: &LlmRequest) -> serde_json::Value {
    let mut body = serde_json::json!({
        "model": &request.model,
        "temperature": request.temperature,
        "messages": request.wire_messages(),
    });

    // Newer OpenAI models (o1, o3, gpt-5, …) require max_completion_tokens
    if uses_max_completion_tokens(&request.model) {
        body["max_completion_tokens"] = serde_json::json!(request.max_tokens);
    } else {
        body["max_tokens"] = serde_json::json!(request.max_tokens);
    }

    if let Some(ref schema) = request.response_schema {
        body["response_format"] = serde_json::json!({
            "type": "json_schema",
            "json_schema": {
                "name": schema.name,
                "strict": true,
                "schema": schema.schema,
            }
        });
    }

    body
}

/// Turn a `/chat/completions` reply into an [`LlmResponse`].
pub(crate) fn parse_response(model: &str, data: &serde_json::Value) -> Result<LlmResponse> {
    let choice = data["choices"]
        .get(0)
        .ok_or_else(|| JournalError::LlmProvider("openai: response has no choices".into()))?;

    if let Some(refusal) = choice["message"]["refusal"].as_str() {
        return Err(JournalError::LlmProvider(format!(
            "openai: model refused: {refusal}"
        )));
    }

    let content = choice["message"]["content"]
        .as_str()
        .unwrap_or("")
        .to_string();

    let usage_data = &data["usage"];
    let input_tokens = usage_data["prompt_tokens"].as_u64().unwrap_or(0) as u32;
    let output_tokens = usage_data["completion_tokens"].as_u64().unwrap_or(0) as u32;

    Ok(LlmResponse {
        message: Message::assistant(content),
        usage: Usage {
            input_tokens,
            output_tokens,
            estimated_cost_usd: estimate_openai_cost(model, input_tokens, output_tokens),
        },
        stop_reason: match choice["finish_reason"].as_str().unwrap_or("") {
            "length" => StopReason::MaxTokens,
            "content_filter" => StopReason::ContentFilter,
            _ => StopReason::EndTurn,
        },
    })
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn models(&self) -> Vec<String> {
        vec![
            "gpt-4o".into(),
            "gpt-4o-mini".into(),
            "o3-mini".into(),
            "o4-mini".into(),
        ]
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        let body = build_body(request);
        debug!(model = %request.model, url = %self.base_url, "sending chat completion");

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| JournalError::LlmProvider(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(JournalError::LlmProvider(format!("HTTP {status}: {text}")));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| JournalError::LlmProvider(e.to_string()))?;

        parse_response(&request.model, &data)
    }
}

/// Returns true for models that require `max_completion_tokens` instead of `max_tokens`.
fn uses_max_completion_tokens(model: &str) -> bool {
    let m = model.to_lowercase();
    m.starts_with("o1")
        || m.starts_with("o3")
        || m.starts_with("o4")
        || m.contains("gpt-5")
        || m.contains("gpt5")
}

/// Estimate cost for OpenAI models (USD per 1M tokens).
fn estimate_openai_cost(model: &str, input_tokens: u32, output_tokens: u32) -> f64 {
    let (input_per_m, output_per_m) = match model {
        m if m.starts_with("gpt-4o-mini") => (0.15, 0.60),
        m if m.starts_with("gpt-4o") => (2.50, 10.00),
        m if m.starts_with("o3-mini") || m.starts_with("o4-mini") => (1.10, 4.40),
        _ => (2.50, 10.00), // default to gpt-4o pricing
    };
    (input_tokens as f64 * input_per_m + output_tokens as f64 * output_per_m) / 1_000_000.0
}
