//! Application-wide error types using thiserror.

use modlog_cogs::StoreError;
use modlog_common::ModlogError;
use modlog_config::ConfigError;
use poise::serenity_prelude as serenity;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Shared layer error, such as logging setup.
    #[error(transparent)]
    Common(#[from] ModlogError),

    /// Log channel store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_wrapped() {
        let err: BotError = ConfigError::Invalid("Discord token is required".to_string()).into();
        assert!(matches!(err, BotError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_common_error_is_transparent() {
        let err: BotError = ModlogError::Logging("no writer".to_string()).into();
        assert_eq!(err.to_string(), "Logging error: no writer");
    }
}
