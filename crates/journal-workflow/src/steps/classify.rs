use async_trait::async_trait;
use tracing::debug;

use journal_core::{ClassifiedEntry, ClassifiedFields, EntryState, Result, schema_of};

use crate::prompts::CLASSIFY_PROMPT;
use crate::step::{JOURNAL_AGENT_ID, Step, StepContext, wrong_state};

/// Raw text → category, area of work, AI tool and task topic.
pub struct ClassifyStep;

pub(crate) fn classify_prompt(raw_text: &str) -> String {
    format!("{CLASSIFY_PROMPT}\n\nJournal entry:\n\"{raw_text}\"")
}

#[async_trait]
impl Step for ClassifyStep {
    fn id(&self) -> &'static str {
        "classify-entry"
    }

    fn description(&self) -> &'static str {
        "Classify raw journal text into structured category, area, tool, and topic"
    }

    fn consumes(&self) -> &'static str {
        "raw"
    }

    fn output_schema(&self) -> serde_json::Value {
        schema_of::<ClassifiedEntry>()
    }

    async fn execute(&self, state: EntryState, ctx: &StepContext) -> Result<EntryState> {
        let input = match state {
            EntryState::Raw(input) => input,
            other => return Err(wrong_state(self, &other)),
        };

        let agent = ctx.agent(JOURNAL_AGENT_ID)?;
        let prompt = classify_prompt(&input.raw_text);
        let fields: ClassifiedFields = agent.generate(self.id(), &prompt).await?;

        debug!(
            run_id = %ctx.run_id,
            category = %fields.category,
            area = %fields.area_of_work,
            "entry classified"
        );
        Ok(EntryState::Classified(ClassifiedEntry::new(input, fields)))
    }
}
