//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use regex::Regex;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("handler.prefix must not be empty")]
    EmptyPrefix,
    #[error("handler.argument_pattern '{pattern}' is not a valid regex: {reason}")]
    InvalidArgumentPattern { pattern: String, reason: String },
    #[error("guild_prefixes.{0} must not be empty")]
    EmptyGuildPrefix(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.handler.prefix.is_empty() {
        errors.push(ValidationError::EmptyPrefix);
    }

    if let Err(e) = Regex::new(&config.handler.argument_pattern) {
        errors.push(ValidationError::InvalidArgumentPattern {
            pattern: config.handler.argument_pattern.clone(),
            reason: e.to_string(),
        });
    }

    let mut empty: Vec<&String> = config
        .guild_prefixes
        .iter()
        .filter(|(_, prefix)| prefix.is_empty())
        .map(|(guild_id, _)| guild_id)
        .collect();
    empty.sort();
    errors.extend(
        empty
            .into_iter()
            .map(|guild_id| ValidationError::EmptyGuildPrefix(guild_id.clone())),
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
