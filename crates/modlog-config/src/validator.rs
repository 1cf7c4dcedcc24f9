//! Runtime validation of a loaded configuration.

use crate::loader::ConfigError;
use crate::schema::Config;
use modlog_common::validate_level;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting every problem at once.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if config.discord.token.trim().is_empty() {
            problems.push("discord.token cannot be empty".to_string());
        }

        if config.discord.prefix.trim().is_empty() {
            problems.push("discord.prefix cannot be empty".to_string());
        }

        if config.discord.owner_ids.contains(&0) {
            problems.push("discord.owner_ids cannot contain 0".to_string());
        }

        if !config.database.in_memory && config.database.path.as_os_str().is_empty() {
            problems.push("database.path cannot be empty unless database.in_memory is set".to_string());
        }

        if config.logging.level.trim().is_empty() {
            problems.push("logging.level cannot be empty".to_string());
        } else if let Err(e) = validate_level(&config.logging.level) {
            problems.push(format!("logging.level is not a valid filter: {e}"));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems.join("; ")))
        }
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigValidator::validate(self)
    }
}
