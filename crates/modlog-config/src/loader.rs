//! Configuration loading with environment variable overrides.

use crate::schema::Config;
use modlog_common::ModlogError;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "MODLOG_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParse {
        /// Offending variable.
        var: String,
        /// What was wrong with it.
        message: String,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Invalid(String),
}

impl From<ConfigError> for ModlogError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the environment and the first config file found.
    ///
    /// Looks at `MODLOG_CONFIG_PATH`, then `config.yaml`, then `config.yml`,
    /// and falls back to defaults. Environment overrides are applied last.
    pub fn load() -> Result<Config, ConfigError> {
        let path = env::var(CONFIG_PATH_ENV)
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                ["config.yaml", "config.yml"]
                    .into_iter()
                    .map(PathBuf::from)
                    .find(|candidate| candidate.exists())
            });

        let mut config = match path {
            Some(path) => Self::read_file(&path)?,
            None => {
                info!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_env_overrides(&mut config, |key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file with environment overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let mut config = Self::read_file(path.as_ref())?;
        Self::apply_env_overrides(&mut config, |key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML text without overrides or validation.
    pub fn from_yaml_str(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn read_file(path: &Path) -> Result<Config, ConfigError> {
        info!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Apply environment variable overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("DISCORD_TOKEN") {
            debug!("Overriding discord.token from environment");
            config.discord.token = token;
        }

        if let Some(prefix) = lookup("MODLOG_PREFIX") {
            config.discord.prefix = prefix;
        }

        if let Some(owners) = lookup("MODLOG_OWNER_IDS") {
            config.discord.owner_ids = owners
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<u64>().map_err(|e| ConfigError::EnvParse {
                        var: "MODLOG_OWNER_IDS".to_string(),
                        message: format!("'{s}': {e}"),
                    })
                })
                .collect::<Result<_, _>>()?;
        }

        if let Some(path) = lookup("MODLOG_DATABASE_PATH") {
            config.database.path = PathBuf::from(path);
        }

        if let Some(level) = lookup("MODLOG_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}
