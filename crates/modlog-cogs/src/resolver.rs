//! Log channel resolution and delivery.

use crate::dispatcher::LogDispatcher;
use crate::embed::DiffEmbed;
use crate::error::CogError;
use crate::store::LogChannelStore;
use modlog_common::LogCategory;
use serenity::all::{ChannelId, GuildId};
use std::sync::Arc;
use tracing::{debug, warn};

/// Finds the log channel a guild configured for a category and posts to it.
///
/// Missing configuration, stale channels and store failures all suppress
/// the log entry; only a failing send is reported to the caller.
#[derive(Clone)]
pub struct LogChannelResolver {
    store: Arc<dyn LogChannelStore>,
}

impl LogChannelResolver {
    /// Creates a resolver reading from `store`.
    pub fn new(store: Arc<dyn LogChannelStore>) -> Self {
        Self { store }
    }

    /// Live log channel for `category` in `guild`, if configured and present.
    pub async fn resolve(
        &self,
        guild: GuildId,
        category: LogCategory,
        dispatcher: &dyn LogDispatcher,
    ) -> Option<ChannelId> {
        let configured = match self.store.get_log_channel(category, guild).await {
            Ok(Some(channel)) => channel,
            Ok(None) => {
                debug!(%guild, %category, "No log channel configured");
                return None;
            }
            Err(e) => {
                warn!(%guild, %category, "Log channel lookup failed: {e}");
                return None;
            }
        };

        if dispatcher.channel_exists(guild, configured) {
            Some(configured)
        } else {
            debug!(%guild, %category, channel = %configured, "Configured log channel no longer exists");
            None
        }
    }

    /// Posts `embed` to the resolved channel. Returns whether it was sent.
    pub async fn resolve_and_send(
        &self,
        guild: GuildId,
        category: LogCategory,
        embed: &DiffEmbed,
        dispatcher: &dyn LogDispatcher,
    ) -> Result<bool, CogError> {
        let Some(channel) = self.resolve(guild, category, dispatcher).await else {
            return Ok(false);
        };

        dispatcher.send_embed(channel, embed).await?;
        Ok(true)
    }
}
