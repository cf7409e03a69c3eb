//! JSON Schema contracts for the records that cross a stage boundary.
//!
//! Schemas are generated from the Rust types with [`schemars::schema_for!`] and
//! checked with `jsonschema` before the value is deserialized, so a model reply
//! either becomes a typed record or yields the full list of violations.

use schemars::{JsonSchema, schema_for};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::entry::{
    ClassifiedEntry, ClassifiedFields, ExpandedEntry, ExpandedFields, JournalEntry, RawInput,
    SkillMapping,
};

/// A record type with a named JSON Schema.
pub trait SchemaContract: JsonSchema + Serialize + DeserializeOwned {
    /// Schema name sent to backends that require one (`[a-zA-Z0-9_-]+`).
    const NAME: &'static str;
}

impl SchemaContract for RawInput {
    const NAME: &'static str = "raw_input";
}

impl SchemaContract for ClassifiedFields {
    const NAME: &'static str = "classified_fields";
}

impl SchemaContract for ExpandedFields {
    const NAME: &'static str = "expanded_fields";
}

impl SchemaContract for SkillMapping {
    const NAME: &'static str = "skill_mapping";
}

impl SchemaContract for ClassifiedEntry {
    const NAME: &'static str = "classified_entry";
}

impl SchemaContract for ExpandedEntry {
    const NAME: &'static str = "expanded_entry";
}

impl SchemaContract for JournalEntry {
    const NAME: &'static str = "journal_entry";
}

/// The JSON Schema of `T` as a plain JSON value.
pub fn schema_of<T: JsonSchema>() -> serde_json::Value {
    schema_for!(T).to_value()
}

/// Check `instance` against `schema`, collecting every violation.
pub fn validate_value(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> std::result::Result<(), Vec<String>> {
    let validator =
        jsonschema::validator_for(schema).map_err(|e| vec![format!("invalid schema: {e}")])?;

    let errors: Vec<String> = validator
        .iter_errors(instance)
        .map(|e| {
            let path = e.instance_path.to_string();
            if path.is_empty() {
                e.to_string()
            } else {
                format!("{path}: {e}")
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate `instance` against `T`'s schema and deserialize it.
pub fn validate<T: SchemaContract>(
    instance: serde_json::Value,
) -> std::result::Result<T, Vec<String>> {
    validate_value(&schema_of::<T>(), &instance)?;
    serde_json::from_value(instance).map_err(|e| vec![e.to_string()])
}
