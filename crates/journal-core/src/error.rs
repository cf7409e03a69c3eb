use thiserror::Error;

/// Unified error type for the work journal.
#[derive(Error, Debug)]
pub enum JournalError {
    // ── Input errors ───────────────────────────────────────────
    #[error("validation error: {0}")]
    Validation(String),

    // ── Pipeline errors ────────────────────────────────────────
    #[error("schema validation failed in stage '{stage}': {}", .errors.join("; "))]
    SchemaValidation { stage: String, errors: Vec<String> },

    #[error("stage '{stage}' returned empty or invalid output: {reason}")]
    EmptyOrInvalidOutput { stage: String, reason: String },

    #[error("agent not registered: {0}")]
    UnregisteredAgent(String),

    #[error("stage '{stage}' expected a {expected} record, got {found}")]
    StageOrder {
        stage: String,
        expected: &'static str,
        found: &'static str,
    },

    // ── LLM errors ─────────────────────────────────────────────
    #[error("llm provider error: {0}")]
    LlmProvider(String),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    // ── Persistence errors ─────────────────────────────────────
    #[error("writer error: {0}")]
    Writer(String),

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl JournalError {
    /// First line of the rendered message, as shown to the user on failure.
    pub fn headline(&self) -> String {
        self.to_string().lines().next().unwrap_or_default().to_string()
    }
}

pub type Result<T> = std::result::Result<T, JournalError>;
