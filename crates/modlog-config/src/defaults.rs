//! Default values for every configuration section.

use crate::schema::*;
use modlog_common::LogFormat;
use std::path::PathBuf;

/// Default text command prefix.
pub const DEFAULT_PREFIX: &str = "!";

/// Default location of the log channel database.
pub const DEFAULT_DATABASE_PATH: &str = "data/modlog.db";

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            prefix: DEFAULT_PREFIX.to_string(),
            owner_ids: Vec::new(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            in_memory: false,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "modlog_bot=info,modlog_cogs=info,modlog_commands=info,warn".to_string(),
            format: LogFormat::Pretty,
            file_path: None,
            include_targets: true,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            creator: "Modlog".to_string(),
        }
    }
}
