//! Configuration loading, validation, and management for Rewaqbot.
//!
//! Loads configuration from `~/.rewaqbot/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.rewaqbot/config.toml`.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Membership roster source
    #[serde(default)]
    pub roster: RosterConfig,

    /// Attendance ledger backend
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Language-model fallback
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("roster", &self.roster)
            .field("ledger", &self.ledger)
            .field("assistant", &self.assistant)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Where the roster comes from: "file" or "sheet".
    #[serde(default = "default_roster_source")]
    pub source: String,

    /// Path to the roster JSON file (source = "file").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Base URL of the spreadsheet service (source = "sheet").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Bearer token for the spreadsheet service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_roster_source() -> String {
    "file".into()
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            source: default_roster_source(),
            path: None,
            base_url: None,
            api_key: None,
        }
    }
}

impl std::fmt::Debug for RosterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterConfig")
            .field("source", &self.source)
            .field("path", &self.path)
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Backing store: "file", "memory", or "sheet".
    #[serde(default = "default_ledger_backend")]
    pub backend: String,

    /// Path to the JSONL ledger (backend = "file").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Base URL of the spreadsheet service (backend = "sheet").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Bearer token for the spreadsheet service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_ledger_backend() -> String {
    "file".into()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            backend: default_ledger_backend(),
            path: None,
            base_url: None,
            api_key: None,
        }
    }
}

impl std::fmt::Debug for LedgerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerConfig")
            .field("backend", &self.backend)
            .field("path", &self.path)
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// API key for the hosted model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Chat-completions base URL.
    #[serde(default = "default_assistant_base_url")]
    pub base_url: String,

    /// Override the built-in knowledge preamble.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,
}

fn default_model() -> String {
    "meta-llama/llama-4-scout-17b-16e-instruct".into()
}

fn default_assistant_base_url() -> String {
    "https://api.groq.com/openai/v1".into()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_assistant_base_url(),
            preamble: None,
        }
    }
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("preamble", &self.preamble.as_deref().map(|_| "<custom>"))
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.rewaqbot/config.toml).
    ///
    /// Also checks environment variables:
    /// - `REWAQBOT_ASSISTANT_API_KEY` (highest priority) or `GROQ_API_KEY`
    /// - `REWAQBOT_SHEET_API_KEY` for the spreadsheet service
    /// - `REWAQBOT_LEDGER_BACKEND` to override the store
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.assistant.api_key.is_none() {
            config.assistant.api_key = std::env::var("REWAQBOT_ASSISTANT_API_KEY")
                .ok()
                .or_else(|| std::env::var("GROQ_API_KEY").ok());
        }

        if let Ok(key) = std::env::var("REWAQBOT_SHEET_API_KEY") {
            if config.ledger.api_key.is_none() {
                config.ledger.api_key = Some(key.clone());
            }
            if config.roster.api_key.is_none() {
                config.roster.api_key = Some(key);
            }
        }

        if let Ok(backend) = std::env::var("REWAQBOT_LEDGER_BACKEND") {
            config.ledger.backend = backend;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".rewaqbot")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.roster.source.as_str() {
            "file" | "sheet" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "roster.source must be \"file\" or \"sheet\", got \"{other}\""
                )));
            }
        }

        match self.ledger.backend.as_str() {
            "file" | "memory" | "sheet" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "ledger.backend must be \"file\", \"memory\", or \"sheet\", got \"{other}\""
                )));
            }
        }

        if self.roster.source == "sheet" && self.roster.base_url.is_none() {
            return Err(ConfigError::ValidationError(
                "roster.base_url is required when roster.source = \"sheet\"".into(),
            ));
        }

        if self.ledger.backend == "sheet" && self.ledger.base_url.is_none() {
            return Err(ConfigError::ValidationError(
                "ledger.base_url is required when ledger.backend = \"sheet\"".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for the `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
