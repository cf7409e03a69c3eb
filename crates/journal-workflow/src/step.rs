use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use journal_core::{EntryState, JournalError, Result};
use journal_llm::JournalAgent;

/// Registry key the journal stages look their agent up under.
pub const JOURNAL_AGENT_ID: &str = "journal-agent";

/// Agents available to a workflow, keyed by id.
#[derive(Default, Clone)]
pub struct AgentRegistry {
    agents: HashMap<String, Arc<JournalAgent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent under its own id, replacing any previous one.
    pub fn register(&mut self, agent: JournalAgent) {
        self.agents.insert(agent.id().to_string(), Arc::new(agent));
    }

    pub fn with_agent(mut self, agent: JournalAgent) -> Self {
        self.register(agent);
        self
    }

    pub fn get(&self, id: &str) -> Result<Arc<JournalAgent>> {
        self.agents
            .get(id)
            .cloned()
            .ok_or_else(|| JournalError::UnregisteredAgent(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.agents.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// What a stage can reach while it runs.
pub struct StepContext {
    pub run_id: String,
    pub agents: AgentRegistry,
}

impl StepContext {
    pub fn agent(&self, id: &str) -> Result<Arc<JournalAgent>> {
        self.agents.get(id)
    }
}

/// One stage of the pipeline.
///
/// A stage consumes exactly one [`EntryState`] kind and returns the next one.
/// The runner validates the returned record against [`Step::output_schema`].
#[async_trait]
pub trait Step: Send + Sync {
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// The [`EntryState::kind`] this stage accepts.
    fn consumes(&self) -> &'static str;

    /// JSON Schema of the accumulated record this stage produces.
    fn output_schema(&self) -> serde_json::Value;

    async fn execute(&self, state: EntryState, ctx: &StepContext) -> Result<EntryState>;
}

/// Error for a stage handed a record in the wrong state.
pub(crate) fn wrong_state(step: &dyn Step, state: &EntryState) -> JournalError {
    JournalError::StageOrder {
        stage: step.id().to_string(),
        expected: step.consumes(),
        found: state.kind(),
    }
}
