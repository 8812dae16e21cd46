//! Configuration loading, validation, and management for AdmitBot.
//!
//! Loads configuration from `~/.admitbot/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The root configuration structure.
///
/// Maps directly to `~/.admitbot/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the knowledge base JSON document
    #[serde(default = "default_knowledge_base_path")]
    pub knowledge_base_path: PathBuf,

    /// Response orchestration settings
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Upload validation settings
    #[serde(default)]
    pub upload: UploadConfig,

    /// Interaction log settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_knowledge_base_path() -> PathBuf {
    PathBuf::from("admission_data.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// How long a caller waits before receiving a "still processing" reply
    #[serde(default = "default_response_timeout_ms")]
    pub response_timeout_ms: u64,

    /// Users whose recorded message count is at most this get greeted
    #[serde(default = "default_greeting_window")]
    pub greeting_window: usize,
}

fn default_response_timeout_ms() -> u64 {
    5_000
}
fn default_greeting_window() -> usize {
    2
}

impl AssistantConfig {
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            response_timeout_ms: default_response_timeout_ms(),
            greeting_window: default_greeting_window(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Accepted file extensions, compared case-insensitively
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["pdf".into(), "jpg".into(), "jpeg".into(), "png".into()]
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether inbound queries and uploads are written to the interaction log
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Append-only interaction log file
    #[serde(default = "default_interaction_log")]
    pub interaction_log: PathBuf,
}

fn default_true() -> bool {
    true
}
fn default_interaction_log() -> PathBuf {
    PathBuf::from("chatbot_analytics.log")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interaction_log: default_interaction_log(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides()?;
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

    /// Environment variable overrides (highest priority).
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(path) = std::env::var("ADMITBOT_KNOWLEDGE_BASE") {
            self.knowledge_base_path = PathBuf::from(path);
        }

        if let Ok(raw) = std::env::var("ADMITBOT_RESPONSE_TIMEOUT_MS") {
            self.assistant.response_timeout_ms = raw.parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "ADMITBOT_RESPONSE_TIMEOUT_MS must be an integer, got '{raw}'"
                ))
            })?;
        }

        if let Ok(path) = std::env::var("ADMITBOT_INTERACTION_LOG") {
            self.logging.interaction_log = PathBuf::from(path);
        }

        self.validate()
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".admitbot")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.assistant.response_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "assistant.response_timeout_ms must be greater than 0".into(),
            ));
        }

        if self.upload.allowed_extensions.is_empty() {
            return Err(ConfigError::ValidationError(
                "upload.allowed_extensions must list at least one extension".into(),
            ));
        }

        if let Some(bad) = self
            .upload
            .allowed_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.contains('.'))
        {
            return Err(ConfigError::ValidationError(format!(
                "upload.allowed_extensions entries must be bare extensions, got '{bad}'"
            )));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            knowledge_base_path: default_knowledge_base_path(),
            assistant: AssistantConfig::default(),
            upload: UploadConfig::default(),
            logging: LoggingConfig::default(),
        }
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
