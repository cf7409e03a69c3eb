use async_trait::async_trait;
use tracing::debug;

use journal_core::{EntryState, ExpandedEntry, JournalEntry, Result, SkillMapping, schema_of};

use crate::prompts::map_skill_prompt;
use crate::step::{JOURNAL_AGENT_ID, Step, StepContext, wrong_state};

/// Expanded entry → exactly one skill from the taxonomy.
pub struct MapSkillStep;

pub(crate) fn skill_prompt(entry: &ExpandedEntry) -> String {
    let context = [
        format!("Category: {}", entry.category),
        format!("Area of Work: {}", entry.area_of_work),
        format!("AI Tool Used: {}", entry.ai_tool_used),
        format!("Task Topic: {}", entry.task_topic),
        format!("What I Did: {}", entry.what_i_did),
        format!("Outcome/Impact: {}", entry.outcome_impact),
    ]
    .join("\n");

    format!("{}\n\nEntry details:\n{context}", map_skill_prompt())
}

#[async_trait]
impl Step for MapSkillStep {
    fn id(&self) -> &'static str {
        "map-skill"
    }

    fn description(&self) -> &'static str {
        "Map the journal entry to a single skill from the predefined taxonomy"
    }

    fn consumes(&self) -> &'static str {
        "expanded"
    }

    fn output_schema(&self) -> serde_json::Value {
        schema_of::<JournalEntry>()
    }

    async fn execute(&self, state: EntryState, ctx: &StepContext) -> Result<EntryState> {
        let entry = match state {
            EntryState::Expanded(entry) => entry,
            other => return Err(wrong_state(self, &other)),
        };

        let agent = ctx.agent(JOURNAL_AGENT_ID)?;
        let mapping: SkillMapping = agent.generate(self.id(), &skill_prompt(&entry)).await?;
        debug!(run_id = %ctx.run_id, skill = %mapping.skill_upskilled, "skill mapped");

        Ok(EntryState::Skilled(JournalEntry::new(entry, mapping)))
    }
}
