//! Core configuration types and loading.

use super::validation::ValidationError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Tokens are separated by runs of whitespace unless configured otherwise.
pub const DEFAULT_ARGUMENT_PATTERN: &str = r"\s+";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join(.0))]
    Invalid(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub handler: HandlerConfig,
    /// Per-guild prefix overrides, keyed by guild id.
    #[serde(default)]
    pub guild_prefixes: HashMap<String, String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

/// Dispatcher settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HandlerConfig {
    /// Default prefix, used wherever no guild override applies.
    pub prefix: String,
    /// Regular expression that splits argument content into tokens.
    #[serde(default = "default_argument_pattern")]
    pub argument_pattern: String,
    /// Per-user cooldown in milliseconds. Zero disables cooldowns.
    #[serde(default)]
    pub cooldown_ms: u64,
}

fn default_argument_pattern() -> String {
    DEFAULT_ARGUMENT_PATTERN.to_string()
}

impl HandlerConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            argument_pattern: default_argument_pattern(),
            cooldown_ms: 0,
        }
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown_ms = u64::try_from(cooldown.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_argument_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.argument_pattern = pattern.into();
        self
    }

    #[inline]
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}
