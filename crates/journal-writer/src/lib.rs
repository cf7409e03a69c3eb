//! # journal-writer
//!
//! Appends finished [`JournalEntry`] records to a tabular file.

pub mod xlsx;

use std::path::PathBuf;

use journal_core::{JournalEntry, Result};

pub use xlsx::XlsxWriter;

/// Column headers and widths, in row order.
pub const COLUMNS: [(&str, f64); 8] = [
    ("Date", 14.0),
    ("Category", 16.0),
    ("Area of Work", 24.0),
    ("AI Tool Used", 20.0),
    ("Task Topic", 32.0),
    ("What I Did", 50.0),
    ("Outcome / Impact", 50.0),
    ("Skill Upskilled", 28.0),
];

/// Persists one entry per call.
pub trait EntryWriter {
    /// Append `entry` as a new row, creating the file and header row if
    /// needed. Returns the path written.
    fn append(&self, entry: &JournalEntry) -> Result<PathBuf>;
}

/// The entry's cells in [`COLUMNS`] order. The raw text is not persisted.
pub fn entry_row(entry: &JournalEntry) -> [String; 8] {
    [
        entry.date.clone(),
        entry.category.to_string(),
        entry.area_of_work.clone(),
        entry.ai_tool_used.clone(),
        entry.task_topic.clone(),
        entry.what_i_did.clone(),
        entry.outcome_impact.clone(),
        entry.skill_upskilled.to_string(),
    ]
}
