use async_trait::async_trait;
use journal_core::{Message, Result, SchemaContract, schema_of};
use serde::{Deserialize, Serialize};

/// A JSON Schema the response must conform to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    /// Schema name, required by OpenAI's structured output (`[a-zA-Z0-9_-]+`).
    pub name: String,
    pub schema: serde_json::Value,
}

impl ResponseSchema {
    /// Schema for a record type, without the `$schema` dialect marker that
    /// structured-output endpoints reject.
    pub fn of<T: SchemaContract>() -> Self {
        let mut schema = schema_of::<T>();
        if let Some(obj) = schema.as_object_mut() {
            obj.remove("$schema");
        }
        Self {
            name: T::NAME.to_string(),
            schema,
        }
    }
}

/// A request to an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// The model to use, e.g. "gpt-4o-mini" or "llama3.2".
    pub model: String,
    /// Conversation history.
    pub messages: Vec<Message>,
    /// System prompt (separate from messages for providers that support it).
    pub system: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Temperature.
    pub temperature: f32,
    /// Constrain the reply to this schema.
    pub response_schema: Option<ResponseSchema>,
}

impl LlmRequest {
    /// System prompt followed by the conversation, as `{"role", "content"}` objects.
    pub fn wire_messages(&self) -> Vec<serde_json::Value> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        if let Some(ref system) = self.system {
            messages.push(serde_json::json!({
                "role": "system",
                "content": system,
            }));
        }
        messages.extend(self.messages.iter().map(Message::to_wire));
        messages
    }
}

/// A complete (non-streaming) response from an LLM.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub message: Message,
    pub usage: Usage,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    ContentFilter,
}

/// Token usage statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    /// Estimated cost in USD (computed by the provider adapter).
    pub estimated_cost_usd: f64,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Trait implemented by each text-generation backend (OpenAI, Ollama, mock).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Human-readable name, e.g. "openai", "ollama"
    fn name(&self) -> &str;

    /// List known models.
    fn models(&self) -> Vec<String>;

    /// Send a non-streaming request.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}
