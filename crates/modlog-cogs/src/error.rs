//! Error types for cog handlers.

/// Failure while handling an event in a cog.
///
/// Only transport failures surface here; a missing or stale log channel is
/// not an error.
#[derive(thiserror::Error, Debug)]
pub enum CogError {
    /// Sending the log message failed.
    #[error("Failed to send log message: {0}")]
    Transport(#[from] serenity::Error),
}
