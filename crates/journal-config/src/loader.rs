use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use journal_core::{JournalError, Result};

use crate::schema::{JournalConfig, ModelProvider};

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub provider: Option<ModelProvider>,
    pub model: Option<String>,
}

/// Loads the journal configuration once at startup.
pub struct ConfigLoader {
    config: JournalConfig,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > JOURNAL_CONFIG env > ~/.journal/journal.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("JOURNAL_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".journal")
            .join("journal.toml")
    }

    /// Load `.env`, the config file (falling back to defaults), and environment
    /// overrides. Call [`ConfigLoader::validate`] once CLI overrides are applied.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(env_path) => debug!(?env_path, "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(error = %e, "failed to read .env file"),
        }

        let config_path = Self::resolve_path(path);
        let config = Self::read_file(&config_path)?;
        let config = Self::apply_env_overrides(config, |key| std::env::var(key).ok())?;

        Ok(Self {
            config,
            config_path,
        })
    }

    fn read_file(config_path: &Path) -> Result<JournalConfig> {
        if !config_path.exists() {
            debug!(?config_path, "config file not found, using defaults");
            return Ok(JournalConfig::default());
        }
        info!(?config_path, "loading configuration");
        let raw = std::fs::read_to_string(config_path)?;
        toml::from_str::<JournalConfig>(&raw).map_err(|e| {
            JournalError::Config(format!(
                "failed to parse {}: {}",
                config_path.display(),
                e
            ))
        })
    }

    /// Apply env var overrides (MODEL_PROVIDER, MODEL_NAME, OLLAMA_BASE_URL, etc.)
    ///
    /// `lookup` abstracts the environment so callers can supply their own source.
    pub fn apply_env_overrides<F>(mut config: JournalConfig, lookup: F) -> Result<JournalConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get("MODEL_PROVIDER") {
            config.model.provider = v
                .parse::<ModelProvider>()
                .map_err(|e| JournalError::Config(format!("MODEL_PROVIDER: {e}")))?;
        }
        if let Some(v) = get("MODEL_NAME") {
            config.model.name = Some(v);
        }
        if let Some(v) = get("OLLAMA_BASE_URL") {
            config.model.ollama_base_url = v;
        }
        if let Some(v) = get("OPENAI_BASE_URL") {
            config.model.openai_base_url = v;
        }
        if let Some(v) = get("JOURNAL_OUTPUT_DIR") {
            config.output.dir = PathBuf::from(v);
        }
        if let Some(v) = get("JOURNAL_LOG_LEVEL") {
            config.logging.level = v;
        }
        // API key: env var fills in when config file doesn't have the key set.
        if config.model.openai_api_key.is_none()
            && let Some(v) = get("OPENAI_API_KEY")
        {
            config.model.openai_api_key = Some(v);
        }
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn apply_cli_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(provider) = overrides.provider {
            self.config.model.provider = provider;
        }
        if let Some(ref model) = overrides.model {
            self.config.model.name = Some(model.clone());
        }
    }

    /// Validate the final config. Logs warnings and fails on errors.
    pub fn validate(&self) -> Result<()> {
        let warnings = self.config.validate().map_err(JournalError::Config)?;
        for w in &warnings {
            warn!("{}", w);
        }
        Ok(())
    }

    /// Get the current config.
    pub fn get(&self) -> &JournalConfig {
        &self.config
    }

    pub fn into_config(self) -> JournalConfig {
        self.config
    }

    /// Path the config was (or would have been) read from.
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}
