use clap::{Parser, Subcommand};
use std::path::PathBuf;

use journal_config::{CliOverrides, ConfigLoader, LoggingConfig, ModelProvider};

mod log;

pub use log::{process_entry, render_report};

/// AI-powered work journal: classify, expand impact, and map skills
#[derive(Parser)]
#[command(name = "journal", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to journal.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a new journal entry
    Log {
        /// Raw journal entry text (wrap in quotes)
        text: String,

        /// Entry date (YYYY-MM-DD); defaults to today
        #[arg(short, long, value_parser = parse_date)]
        date: Option<String>,

        /// Model provider: openai or ollama
        #[arg(short, long)]
        provider: Option<ModelProvider>,

        /// Model name (e.g. gpt-4o-mini, llama3.2, mistral)
        #[arg(short, long)]
        model: Option<String>,
    },
}

/// Accept only calendar dates in `YYYY-MM-DD` form.
fn parse_date(s: &str) -> std::result::Result<String, String> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|e| format!("invalid date `{s}` (expected YYYY-MM-DD): {e}"))
}

/// Exit status for a failed parse: help and version output exit 0, argument
/// errors exit 1 like every other failure.
pub fn parse_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// First line of a clap error, without its `error: ` prefix.
pub fn parse_error_headline(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

impl Cli {
    pub async fn run(self) -> journal_core::Result<()> {
        // Load config first so we can use it for log format
        let mut config_loader = ConfigLoader::load(self.config.as_deref())?;

        // Resolve log level: --verbose > --quiet > --log-level > config default
        let log_level = if self.verbose {
            "debug".to_string()
        } else if self.quiet {
            "error".to_string()
        } else {
            self.log_level
                .clone()
                .unwrap_or_else(|| config_loader.get().logging.level.clone())
        };
        init_tracing(&config_loader.get().logging, &log_level);

        match self.command {
            Commands::Log {
                text,
                date,
                provider,
                model,
            } => {
                config_loader.apply_cli_overrides(&CliOverrides { provider, model });
                config_loader.validate()?;
                let date = date.unwrap_or_else(today);
                log::cmd_log(config_loader.into_config(), text, date).await
            }
        }
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays the report.
fn init_tracing(logging: &LoggingConfig, level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    match logging.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .init(),
        "compact" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .with_target(false)
            .init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init(),
    }
}

/// Today's date in UTC.
fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
