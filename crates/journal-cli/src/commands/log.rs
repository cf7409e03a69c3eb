use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

use journal_config::JournalConfig;
use journal_core::{JournalEntry, RawInput, Result};
use journal_workflow::{AgentRegistry, Workflow, WorkflowRun};
use journal_writer::{EntryWriter, XlsxWriter};

use crate::provider::{build_agent, build_provider};

pub(super) async fn cmd_log(config: JournalConfig, text: String, date: String) -> Result<()> {
    println!("\nProcessing journal entry with {}...\n", config.model.label());

    let provider = build_provider(&config.model)?;
    let agents = AgentRegistry::new().with_agent(build_agent(&config.model, provider));
    let workflow = Workflow::journal(agents);
    let writer = XlsxWriter::from_config(&config.output);

    let (run, path) = process_entry(&workflow, &writer, RawInput { raw_text: text, date }).await?;

    print!("{}", render_report(&run.entry));
    println!("Saved to: {}\n", path.display());
    Ok(())
}

/// Run the pipeline and persist the result. Nothing is written unless every
/// stage succeeds.
pub async fn process_entry(
    workflow: &Workflow,
    writer: &dyn EntryWriter,
    input: RawInput,
) -> Result<(WorkflowRun, PathBuf)> {
    let run = workflow.run(input).await?;
    let path = writer.append(&run.entry)?;
    info!(run_id = %run.run_id, path = %path.display(), "entry logged");
    Ok((run, path))
}

/// The human-readable summary printed after a successful run.
pub fn render_report(entry: &JournalEntry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Classification");
    let _ = writeln!(out, "   Category:       {}", entry.category);
    let _ = writeln!(out, "   Area of Work:   {}", entry.area_of_work);
    let _ = writeln!(out, "   AI Tool Used:   {}", entry.ai_tool_used);
    let _ = writeln!(out, "   Task Topic:     {}", entry.task_topic);
    let _ = writeln!(out);
    let _ = writeln!(out, "Impact");
    let _ = writeln!(out, "   What I Did:     {}", entry.what_i_did);
    let _ = writeln!(out, "   Impact:         {}", entry.outcome_impact);
    let _ = writeln!(out);
    let _ = writeln!(out, "Skill");
    let _ = writeln!(out, "   Upskilled:      {}", entry.skill_upskilled);
    let _ = writeln!(out);
    out
}
