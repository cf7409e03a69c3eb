use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Root configuration, mapped from `journal.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    pub model: ModelConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

// ── Model ──────────────────────────────────────────────────────

/// Which text-generation backend to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    OpenAi,
    Ollama,
}

impl ModelProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "openai",
            ModelProvider::Ollama => "ollama",
        }
    }

    /// Model used when none is configured for this provider.
    pub fn default_model(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "gpt-4o-mini",
            ModelProvider::Ollama => "llama3.2",
        }
    }
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ModelProvider::OpenAi),
            "ollama" => Ok(ModelProvider::Ollama),
            other => Err(format!(
                "unknown model provider '{other}' (expected 'openai' or 'ollama')"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Backend provider: "openai" or "ollama".
    pub provider: ModelProvider,
    /// Model name. When unset, the provider's default is used.
    pub name: Option<String>,
    /// Temperature (0.0 - 2.0).
    pub temperature: f32,
    /// Maximum tokens per response.
    pub max_tokens: u32,
    /// Base URL of the Ollama API, including the `/api` suffix.
    pub ollama_base_url: String,
    /// Base URL of the OpenAI-compatible API.
    pub openai_base_url: String,
    /// OpenAI API key. Can also be set via OPENAI_API_KEY environment variable.
    /// Config file takes priority over environment variable.
    pub openai_api_key: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ModelProvider::OpenAi,
            name: None,
            temperature: 0.2,
            max_tokens: 1024,
            ollama_base_url: "http://localhost:11434/api".into(),
            openai_base_url: "https://api.openai.com/v1".into(),
            openai_api_key: None,
        }
    }
}

impl ModelConfig {
    /// The model name after applying the provider default.
    pub fn resolved_model(&self) -> String {
        self.name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    /// `provider/model` label shown to the user.
    pub fn label(&self) -> String {
        format!("{}/{}", self.provider, self.resolved_model())
    }
}

// ── Output ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the workbook lives in. Created on first write.
    pub dir: PathBuf,
    /// Workbook file name inside `dir`.
    pub file_name: String,
    /// Worksheet that receives the rows.
    pub sheet_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            file_name: "journal.xlsx".into(),
            sheet_name: "Journal".into(),
        }
    }
}

impl OutputConfig {
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "pretty", "json", "compact".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

/// A single config validation issue.
#[derive(Debug)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            WarningSeverity::Error => "error",
            WarningSeverity::Warning => "warning",
        };
        write!(f, "{} {}: {}", label, self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, " ({h})")?;
        }
        Ok(())
    }
}

impl JournalConfig {
    /// Validate the config and return a list of warnings.
    /// Returns `Err` with all messages joined if any severity is Error.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();

        // ── Model ───
        if self.model.temperature < 0.0 || self.model.temperature > 2.0 {
            warnings.push(ConfigWarning {
                field: "model.temperature".into(),
                message: format!("temperature {} is out of range", self.model.temperature),
                severity: WarningSeverity::Warning,
                hint: Some("Temperature should be between 0.0 and 2.0".into()),
            });
        }

        if self.model.max_tokens == 0 {
            warnings.push(ConfigWarning {
                field: "model.max_tokens".into(),
                message: "max_tokens is 0, the model can't produce output".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 1024".into()),
            });
        }

        let base_url = match self.model.provider {
            ModelProvider::OpenAi => ("model.openai_base_url", &self.model.openai_base_url),
            ModelProvider::Ollama => ("model.ollama_base_url", &self.model.ollama_base_url),
        };
        if !base_url.1.starts_with("http://") && !base_url.1.starts_with("https://") {
            warnings.push(ConfigWarning {
                field: base_url.0.into(),
                message: format!("'{}' is not an http(s) URL", base_url.1),
                severity: WarningSeverity::Warning,
                hint: None,
            });
        }

        if self.model.provider == ModelProvider::OpenAi
            && self
                .model
                .openai_api_key
                .as_deref()
                .is_none_or(|k| k.is_empty())
        {
            warnings.push(ConfigWarning {
                field: "model.openai_api_key".into(),
                message: "provider is openai but no API key is set".into(),
                severity: WarningSeverity::Warning,
                hint: Some("Set OPENAI_API_KEY or use --provider ollama".into()),
            });
        }

        // ── Output ───
        if self.output.file_name.trim().is_empty() {
            warnings.push(ConfigWarning {
                field: "output.file_name".into(),
                message: "file name is empty".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 'journal.xlsx'".into()),
            });
        }

        if self.output.sheet_name.trim().is_empty() {
            warnings.push(ConfigWarning {
                field: "output.sheet_name".into(),
                message: "sheet name is empty".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 'Journal'".into()),
            });
        }

        // ── Logging ───
        if !matches!(self.logging.format.as_str(), "pretty" | "json" | "compact") {
            warnings.push(ConfigWarning {
                field: "logging.format".into(),
                message: format!("unknown log format '{}'", self.logging.format),
                severity: WarningSeverity::Warning,
                hint: Some("Use 'pretty', 'json', or 'compact'".into()),
            });
        }

        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| w.to_string())
            .collect();
        if !errors.is_empty() {
            return Err(errors.join("; "));
        }

        Ok(warnings)
    }
}
