//! # journal-core
//!
//! Core types and primitives for the work journal.
//! This crate defines the shared vocabulary used by every other crate in the workspace:
//! the journal record at each stage of the pipeline, the closed category and skill
//! sets, the JSON Schema contracts checked at stage boundaries, and the error type.

pub mod entry;
pub mod error;
pub mod message;
pub mod schema;

pub use entry::{
    Category, ClassifiedEntry, ClassifiedFields, EntryState, ExpandedEntry, ExpandedFields,
    JournalEntry, RawInput, Skill, SkillMapping,
};
pub use error::{JournalError, Result};
pub use message::{Message, Role};
pub use schema::{SchemaContract, schema_of, validate, validate_value};
