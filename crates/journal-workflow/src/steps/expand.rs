use async_trait::async_trait;
use tracing::debug;

use journal_core::{ClassifiedEntry, EntryState, ExpandedEntry, ExpandedFields, Result, schema_of};

use crate::prompts::EXPAND_PROMPT;
use crate::step::{JOURNAL_AGENT_ID, Step, StepContext, wrong_state};

/// Classified entry → what was done and what it achieved.
pub struct ExpandImpactStep;

pub(crate) fn expand_prompt(entry: &ClassifiedEntry) -> String {
    let context = [
        format!("Category: {}", entry.category),
        format!("Area of Work: {}", entry.area_of_work),
        format!("AI Tool Used: {}", entry.ai_tool_used),
        format!("Task Topic: {}", entry.task_topic),
        format!("Original Entry: \"{}\"", entry.raw_text),
    ]
    .join("\n");

    format!("{EXPAND_PROMPT}\n\nEntry details:\n{context}")
}

#[async_trait]
impl Step for ExpandImpactStep {
    fn id(&self) -> &'static str {
        "expand-impact"
    }

    fn description(&self) -> &'static str {
        "Expand classified entry into promotion-ready impact statements"
    }

    fn consumes(&self) -> &'static str {
        "classified"
    }

    fn output_schema(&self) -> serde_json::Value {
        schema_of::<ExpandedEntry>()
    }

    async fn execute(&self, state: EntryState, ctx: &StepContext) -> Result<EntryState> {
        let entry = match state {
            EntryState::Classified(entry) => entry,
            other => return Err(wrong_state(self, &other)),
        };

        let agent = ctx.agent(JOURNAL_AGENT_ID)?;
        let fields: ExpandedFields = agent.generate(self.id(), &expand_prompt(&entry)).await?;
        debug!(run_id = %ctx.run_id, chars = fields.what_i_did.len(), "impact expanded");

        Ok(EntryState::Expanded(ExpandedEntry::new(entry, fields)))
    }
}
