//! # journal-workflow
//!
//! The journal pipeline: an ordered chain of stages that turns a [`RawInput`]
//! into a finished [`JournalEntry`].
//!
//! ## Stages
//!
//! - `classify-entry`: category, area of work, AI tool, task topic
//! - `expand-impact`: what was done and its outcome
//! - `map-skill`: one skill from the closed taxonomy
//!
//! Every stage asks the `journal-agent` for a schema-constrained reply and the
//! runner re-checks the accumulated record after each one. The first failure
//! ends the run.
//!
//! [`RawInput`]: journal_core::RawInput
//! [`JournalEntry`]: journal_core::JournalEntry

pub mod prompts;
pub mod step;
pub mod steps;
pub mod workflow;

pub use step::{AgentRegistry, JOURNAL_AGENT_ID, Step, StepContext};
pub use steps::{ClassifyStep, ExpandImpactStep, MapSkillStep};
pub use workflow::{JOURNAL_WORKFLOW_ID, Workflow, WorkflowRun};
