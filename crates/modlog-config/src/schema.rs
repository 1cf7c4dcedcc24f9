//! Configuration schema definitions using serde.

use modlog_common::{LogFormat, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the modlog bot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Log channel database configuration.
    pub database: DatabaseConfig,
    /// Logging configuration.
    pub logging: LoggingSettings,
    /// Presentation settings.
    pub bot: BotConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Prefix for text commands.
    pub prefix: String,
    /// Users allowed to run `sudo` commands.
    pub owner_ids: Vec<u64>,
}

/// Log channel database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Directory of the sled database.
    pub path: PathBuf,
    /// Keep log channel settings in memory only.
    pub in_memory: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level filter, `RUST_LOG` syntax.
    pub level: String,
    /// Line format.
    pub format: LogFormat,
    /// Optional log file, rotated daily.
    pub file_path: Option<PathBuf>,
    /// Whether to include the event target.
    pub include_targets: bool,
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Team credited in the stats footer.
    pub creator: String,
}

impl Config {
    /// Whether `user_id` is on the owner allow-list.
    pub fn is_owner(&self, user_id: u64) -> bool {
        self.discord.owner_ids.contains(&user_id)
    }
}

impl LoggingSettings {
    /// Converts into the logging bootstrap configuration.
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            format: self.format,
            file_path: self.file_path.clone(),
            include_targets: self.include_targets,
        }
    }
}
