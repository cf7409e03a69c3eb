//! # journal-llm
//!
//! Abstraction layer over text-generation backends (OpenAI, Ollama) plus the
//! structured-generation adapter that turns a prompt into a schema-checked record.

pub mod agent;
pub mod mock;
pub mod ollama;
pub mod openai;
pub mod provider;

pub use agent::{JournalAgent, parse_structured};
pub use mock::{MockProvider, MockResponse};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use provider::{LlmProvider, LlmRequest, LlmResponse, ResponseSchema, StopReason, Usage};
