//! # journal-config
//!
//! Configuration for the work journal. Reads from `journal.toml`, a `.env` file,
//! environment variables, and CLI overrides, in that precedence order.
//!
//! The configuration is built once at process start and passed by reference to
//! the model adapter and the writer.

pub mod loader;
pub mod schema;

pub use loader::{CliOverrides, ConfigLoader};
pub use schema::{
    ConfigWarning, JournalConfig, LoggingConfig, ModelConfig, ModelProvider, OutputConfig,
    WarningSeverity,
};
