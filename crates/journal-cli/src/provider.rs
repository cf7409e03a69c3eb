//! Backend wiring from configuration.

use std::sync::Arc;
use tracing::debug;

use journal_config::{ModelConfig, ModelProvider};
use journal_core::{JournalError, Result};
use journal_llm::{JournalAgent, LlmProvider, OllamaProvider, OpenAiProvider};
use journal_workflow::JOURNAL_AGENT_ID;
use journal_workflow::prompts::SYSTEM_PROMPT;

/// Construct the configured backend.
pub fn build_provider(config: &ModelConfig) -> Result<Arc<dyn LlmProvider>> {
    let provider: Arc<dyn LlmProvider> = match config.provider {
        ModelProvider::OpenAi => {
            let key = config
                .openai_api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| {
                    JournalError::Config(
                        "OpenAI API key not set. Add openai_api_key to [model] in journal.toml \
                         or set OPENAI_API_KEY"
                            .into(),
                    )
                })?;
            Arc::new(OpenAiProvider::new(key).with_base_url(&config.openai_base_url))
        }
        ModelProvider::Ollama => Arc::new(OllamaProvider::new(
            &config.ollama_base_url,
            config.resolved_model(),
        )),
    };

    debug!(provider = provider.name(), model = %config.resolved_model(), "provider ready");
    Ok(provider)
}

/// The `journal-agent` bound to `provider` with the configured sampling.
pub fn build_agent(config: &ModelConfig, provider: Arc<dyn LlmProvider>) -> JournalAgent {
    JournalAgent::new(JOURNAL_AGENT_ID, provider, config.resolved_model())
        .with_instructions(SYSTEM_PROMPT)
        .with_sampling(config.temperature, config.max_tokens)
}
