//! # journal-cli
//!
//! Command-line interface for the work journal.
//!
//! ## Commands
//!
//! - `journal log <text>`: Classify, expand and skill-map an entry, then append it to the workbook

pub mod commands;
pub mod provider;

pub use commands::{Cli, parse_error_headline, parse_exit_code};
pub use provider::{build_agent, build_provider};
