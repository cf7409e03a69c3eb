use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{JournalError, Result};

/// The kind of work a journal entry describes.
///
/// `Learning` is experimenting, studying or researching; `Productivity` is using
/// AI to accelerate delivery; `Discovery` is evaluating or sharing new tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Category {
    Learning,
    Productivity,
    Discovery,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Learning,
        Category::Productivity,
        Category::Discovery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Learning => "Learning",
            Category::Productivity => "Productivity",
            Category::Discovery => "Discovery",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed skill taxonomy. A mapped entry always names exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Skill {
    #[serde(rename = "Agentic System Design")]
    AgenticSystemDesign,
    #[serde(rename = "Workflow Engineering")]
    WorkflowEngineering,
    #[serde(rename = "Prompt Engineering")]
    PromptEngineering,
    #[serde(rename = "AI Tool Evaluation")]
    AiToolEvaluation,
    #[serde(rename = "Knowledge Management")]
    KnowledgeManagement,
    #[serde(rename = "Productivity Optimization")]
    ProductivityOptimization,
    #[serde(rename = "Frontend Architecture")]
    FrontendArchitecture,
    #[serde(rename = "Backend Architecture")]
    BackendArchitecture,
    #[serde(rename = "Testing Automation")]
    TestingAutomation,
    #[serde(rename = "Developer Experience")]
    DeveloperExperience,
}

impl Skill {
    pub const ALL: [Skill; 10] = [
        Skill::AgenticSystemDesign,
        Skill::WorkflowEngineering,
        Skill::PromptEngineering,
        Skill::AiToolEvaluation,
        Skill::KnowledgeManagement,
        Skill::ProductivityOptimization,
        Skill::FrontendArchitecture,
        Skill::BackendArchitecture,
        Skill::TestingAutomation,
        Skill::DeveloperExperience,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::AgenticSystemDesign => "Agentic System Design",
            Skill::WorkflowEngineering => "Workflow Engineering",
            Skill::PromptEngineering => "Prompt Engineering",
            Skill::AiToolEvaluation => "AI Tool Evaluation",
            Skill::KnowledgeManagement => "Knowledge Management",
            Skill::ProductivityOptimization => "Productivity Optimization",
            Skill::FrontendArchitecture => "Frontend Architecture",
            Skill::BackendArchitecture => "Backend Architecture",
            Skill::TestingAutomation => "Testing Automation",
            Skill::DeveloperExperience => "Developer Experience",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Pipeline input ─────────────────────────────────────────────

/// Raw journal text as typed by the user, plus the entry date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawInput {
    #[schemars(length(min = 1))]
    pub raw_text: String,
    pub date: String,
}

impl RawInput {
    /// Build and validate a raw input. Fails if `raw_text` is empty.
    pub fn new(raw_text: impl Into<String>, date: impl Into<String>) -> Result<Self> {
        let input = Self {
            raw_text: raw_text.into(),
            date: date.into(),
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<()> {
        if self.raw_text.is_empty() {
            return Err(JournalError::Validation(
                "rawText must be a non-empty string".into(),
            ));
        }
        Ok(())
    }
}

// ── Model output shapes (one per stage) ────────────────────────

/// Fields produced by the classify stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClassifiedFields {
    pub category: Category,
    pub area_of_work: String,
    pub ai_tool_used: String,
    pub task_topic: String,
}

/// Fields produced by the expand stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpandedFields {
    pub what_i_did: String,
    pub outcome_impact: String,
}

/// Field produced by the map-skill stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SkillMapping {
    pub skill_upskilled: Skill,
}

// ── Accumulated records (one per stage boundary) ───────────────

/// Record after classification: raw input plus classified fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClassifiedEntry {
    pub raw_text: String,
    pub date: String,
    pub category: Category,
    pub area_of_work: String,
    pub ai_tool_used: String,
    pub task_topic: String,
}

impl ClassifiedEntry {
    pub fn new(input: RawInput, fields: ClassifiedFields) -> Self {
        Self {
            raw_text: input.raw_text,
            date: input.date,
            category: fields.category,
            area_of_work: fields.area_of_work,
            ai_tool_used: fields.ai_tool_used,
            task_topic: fields.task_topic,
        }
    }
}

/// Record after expansion: everything classified plus the impact statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpandedEntry {
    pub raw_text: String,
    pub date: String,
    pub category: Category,
    pub area_of_work: String,
    pub ai_tool_used: String,
    pub task_topic: String,
    pub what_i_did: String,
    pub outcome_impact: String,
}

impl ExpandedEntry {
    pub fn new(entry: ClassifiedEntry, fields: ExpandedFields) -> Self {
        Self {
            raw_text: entry.raw_text,
            date: entry.date,
            category: entry.category,
            area_of_work: entry.area_of_work,
            ai_tool_used: entry.ai_tool_used,
            task_topic: entry.task_topic,
            what_i_did: fields.what_i_did,
            outcome_impact: fields.outcome_impact,
        }
    }
}

/// The finished journal record handed to the spreadsheet writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JournalEntry {
    pub date: String,
    pub raw_text: String,
    pub category: Category,
    pub area_of_work: String,
    pub ai_tool_used: String,
    pub task_topic: String,
    pub what_i_did: String,
    pub outcome_impact: String,
    pub skill_upskilled: Skill,
}

impl JournalEntry {
    pub fn new(entry: ExpandedEntry, mapping: SkillMapping) -> Self {
        Self {
            date: entry.date,
            raw_text: entry.raw_text,
            category: entry.category,
            area_of_work: entry.area_of_work,
            ai_tool_used: entry.ai_tool_used,
            task_topic: entry.task_topic,
            what_i_did: entry.what_i_did,
            outcome_impact: entry.outcome_impact,
            skill_upskilled: mapping.skill_upskilled,
        }
    }
}

/// The record under construction, one variant per pipeline state.
///
/// Transitions are strictly `Raw → Classified → Expanded → Skilled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    Raw(RawInput),
    Classified(ClassifiedEntry),
    Expanded(ExpandedEntry),
    Skilled(JournalEntry),
}

impl EntryState {
    /// Short name of the current state, used in errors and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EntryState::Raw(_) => "raw",
            EntryState::Classified(_) => "classified",
            EntryState::Expanded(_) => "expanded",
            EntryState::Skilled(_) => "skilled",
        }
    }

    /// Serialize the current record to JSON for schema checks.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        let value = match self {
            EntryState::Raw(r) => serde_json::to_value(r)?,
            EntryState::Classified(c) => serde_json::to_value(c)?,
            EntryState::Expanded(e) => serde_json::to_value(e)?,
            EntryState::Skilled(j) => serde_json::to_value(j)?,
        };
        Ok(value)
    }

    /// The finished entry, if the record has reached its terminal state.
    pub fn into_entry(self) -> Option<JournalEntry> {
        match self {
            EntryState::Skilled(entry) => Some(entry),
            _ => None,
        }
    }
}
