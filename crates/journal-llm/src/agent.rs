//! Structured generation over an [`LlmProvider`].
//!
//! [`JournalAgent::generate`] is the single place model output enters the
//! system: the reply must parse as a JSON object and pass the target type's
//! schema, or the call fails naming the stage that asked for it.

use std::sync::Arc;
use tracing::{debug, info, warn};

use journal_core::{JournalError, Message, Result, SchemaContract, validate};

use crate::provider::{LlmProvider, LlmRequest, ResponseSchema, StopReason};

/// A model bound to a provider, a fixed system prompt, and sampling settings.
pub struct JournalAgent {
    id: String,
    provider: Arc<dyn LlmProvider>,
    model: String,
    instructions: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

impl JournalAgent {
    pub fn new(
        id: impl Into<String>,
        provider: Arc<dyn LlmProvider>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            provider,
            model: model.into(),
            instructions: None,
            temperature: 0.2,
            max_tokens: 1024,
        }
    }

    /// System prompt sent with every request.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Send `prompt` and return the reply as a schema-conformant `T`.
    pub async fn generate<T: SchemaContract>(&self, stage: &str, prompt: &str) -> Result<T> {
        if prompt.trim().is_empty() {
            return Err(JournalError::Validation(format!(
                "stage '{stage}' built an empty prompt"
            )));
        }

        let request = LlmRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            system: self.instructions.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            response_schema: Some(ResponseSchema::of::<T>()),
        };

        debug!(
            stage,
            agent = %self.id,
            provider = self.provider.name(),
            model = %self.model,
            schema = T::NAME,
            prompt_chars = prompt.len(),
            "invoking model"
        );

        let response = self.provider.complete(&request).await?;

        info!(
            stage,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            cost_usd = response.usage.estimated_cost_usd,
            "model responded"
        );
        if response.stop_reason != StopReason::EndTurn {
            warn!(stage, stop_reason = ?response.stop_reason, "model stopped early");
        }

        parse_structured::<T>(stage, &response.message.content)
    }
}

/// Parse a model reply into `T`, validating it against `T`'s schema.
pub fn parse_structured<T: SchemaContract>(stage: &str, text: &str) -> Result<T> {
    let invalid = |reason: String| JournalError::EmptyOrInvalidOutput {
        stage: stage.to_string(),
        reason,
    };

    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(invalid("empty response".into()));
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| invalid(format!("response is not valid JSON: {e}")))?;

    if !value.is_object() {
        return Err(invalid("expected a JSON object".into()));
    }

    validate::<T>(value).map_err(|errors| {
        invalid(format!(
            "output does not match {}: {}",
            T::NAME,
            errors.join("; ")
        ))
    })
}

/// Remove a surrounding markdown code fence (```json … ```), if any.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // Drop the info string ("json") on the opening fence line.
    match rest.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with('{') => body.trim(),
        _ => rest.trim(),
    }
}
