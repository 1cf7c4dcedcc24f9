//! Common type definitions shared by the bot crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A category of log output a guild can route to its own channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogCategory {
    /// Channel, role and guild changes.
    ServerLog,
    /// Members joining, leaving and being moderated in voice.
    VoiceLog,
}

impl LogCategory {
    /// Every known category, in display order.
    pub const ALL: [Self; 2] = [Self::ServerLog, Self::VoiceLog];

    /// Storage key of the category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ServerLog => "server_log",
            Self::VoiceLog => "voice_log",
        }
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogCategory {
    type Err = ModlogError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModlogError::UnknownCategory(s.to_string()))
    }
}

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, ModlogError>;

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum ModlogError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown log category name.
    #[error("Unknown log category '{0}' (expected one of: server_log, voice_log)")]
    UnknownCategory(String),

    /// Logging could not be initialised.
    #[error("Logging error: {0}")]
    Logging(String),
}
