//! The pipeline runner.

use std::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use journal_core::{
    EntryState, JournalEntry, JournalError, RawInput, Result, schema_of, validate_value,
};

use crate::step::{AgentRegistry, Step, StepContext};
use crate::steps::{ClassifyStep, ExpandImpactStep, MapSkillStep};

pub const JOURNAL_WORKFLOW_ID: &str = "journal-workflow";

/// Outcome of one successful run.
#[derive(Debug, Clone)]
pub struct WorkflowRun {
    pub run_id: String,
    pub workflow_id: String,
    /// Stage ids in the order they completed.
    pub completed: Vec<&'static str>,
    pub entry: JournalEntry,
}

/// An ordered chain of stages sharing one agent registry.
pub struct Workflow {
    id: String,
    steps: Vec<Box<dyn Step>>,
    agents: AgentRegistry,
}

impl Workflow {
    pub fn new(id: impl Into<String>, agents: AgentRegistry) -> Self {
        Self {
            id: id.into(),
            steps: Vec::new(),
            agents,
        }
    }

    /// Append a stage to the end of the chain.
    pub fn then(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// The standard chain: classify, expand impact, map skill.
    pub fn journal(agents: AgentRegistry) -> Self {
        Self::new(JOURNAL_WORKFLOW_ID, agents)
            .then(ClassifyStep)
            .then(ExpandImpactStep)
            .then(MapSkillStep)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn step_ids(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.id()).collect()
    }

    /// Run every stage in order. The first failure aborts the run.
    pub async fn run(&self, input: RawInput) -> Result<WorkflowRun> {
        check_input(&input)?;

        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("workflow", workflow = %self.id, run_id = %run_id);
        self.run_stages(run_id, input).instrument(span).await
    }

    async fn run_stages(&self, run_id: String, input: RawInput) -> Result<WorkflowRun> {
        let started = Instant::now();
        info!(stages = ?self.step_ids(), date = %input.date, "run started");

        let ctx = StepContext {
            run_id: run_id.clone(),
            agents: self.agents.clone(),
        };

        let mut state = EntryState::Raw(input);
        let mut completed = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let stage = step.id();
            let stage_started = Instant::now();
            debug!(stage, about = step.description(), from = state.kind(), "stage started");

            state = step.execute(state, &ctx).await.inspect_err(|e| {
                warn!(stage, error = %e, "stage failed");
            })?;

            validate_value(&step.output_schema(), &state.to_value()?).map_err(|errors| {
                warn!(stage, violations = errors.len(), "stage output failed schema check");
                JournalError::SchemaValidation {
                    stage: stage.to_string(),
                    errors,
                }
            })?;

            completed.push(stage);
            info!(
                stage,
                to = state.kind(),
                elapsed_ms = stage_started.elapsed().as_millis() as u64,
                "stage completed"
            );
        }

        let found = state.kind();
        let entry = state.into_entry().ok_or_else(|| JournalError::StageOrder {
            stage: self.id.clone(),
            expected: "skilled",
            found,
        })?;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            skill = %entry.skill_upskilled,
            "run completed"
        );

        Ok(WorkflowRun {
            run_id,
            workflow_id: self.id.clone(),
            completed,
            entry,
        })
    }
}

/// Reject malformed input before any stage runs.
fn check_input(input: &RawInput) -> Result<()> {
    input.validate()?;
    let value = serde_json::to_value(input)?;
    validate_value(&schema_of::<RawInput>(), &value)
        .map_err(|errors| JournalError::Validation(errors.join("; ")))
}
