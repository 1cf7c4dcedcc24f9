//! Cog trait definitions for pluggable event handlers.

use crate::dispatcher::LogDispatcher;
use crate::error::CogError;
use crate::event::{BotEvent, EventKind};
use async_trait::async_trait;

/// A self-contained event handler that can be loaded and unloaded at runtime.
#[async_trait]
pub trait Cog: Send + Sync {
    /// Unique name used by the `sudo load`/`unload` commands.
    fn name(&self) -> &'static str;

    /// Event kinds this cog is routed.
    fn subscriptions(&self) -> &'static [EventKind];

    /// Handles one event. Only kinds from [`Cog::subscriptions`] are passed.
    async fn handle(&self, event: &BotEvent, dispatcher: &dyn LogDispatcher) -> Result<(), CogError>;
}
