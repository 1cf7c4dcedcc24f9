//! Server log cog: channel changes to the `server_log` channel.

use crate::cog::Cog;
use crate::dispatcher::LogDispatcher;
use crate::error::CogError;
use crate::event::{BotEvent, EventKind};
use crate::formatter::format_channel_update;
use crate::resolver::LogChannelResolver;
use async_trait::async_trait;
use modlog_common::LogCategory;
use std::sync::Arc;
use tracing::debug;

/// Logs channel updates to the guild's server log.
pub struct ServerLog {
    resolver: Arc<LogChannelResolver>,
}

impl ServerLog {
    /// Cog name.
    pub const NAME: &'static str = "server_log";

    /// Creates the cog.
    pub fn new(resolver: Arc<LogChannelResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Cog for ServerLog {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn subscriptions(&self) -> &'static [EventKind] {
        &[EventKind::ChannelUpdate]
    }

    async fn handle(&self, event: &BotEvent, dispatcher: &dyn LogDispatcher) -> Result<(), CogError> {
        let BotEvent::ChannelUpdate {
            guild_id,
            before,
            after,
        } = event
        else {
            return Ok(());
        };

        let Some(embed) = format_channel_update(before, after) else {
            return Ok(());
        };

        let sent = self
            .resolver
            .resolve_and_send(*guild_id, LogCategory::ServerLog, &embed, dispatcher)
            .await?;
        debug!(guild = %guild_id, channel = %after.id, sent, "Processed channel update");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::MockLogDispatcher;
    use crate::snapshot::{ChannelKind, ChannelSnapshot};
    use crate::store::{LogChannelStore, MemoryLogChannelStore};
    use serenity::all::{ChannelId, GuildId};

    async fn cog_with_log_channel() -> ServerLog {
        let store = MemoryLogChannelStore::new();
        store
            .set_log_channel(LogCategory::ServerLog, GuildId::new(1), ChannelId::new(99))
            .await
            .unwrap();
        ServerLog::new(Arc::new(LogChannelResolver::new(Arc::new(store))))
    }

    fn update(before: ChannelSnapshot, after: ChannelSnapshot) -> BotEvent {
        BotEvent::ChannelUpdate {
            guild_id: GuildId::new(1),
            before,
            after,
        }
    }

    fn channel() -> ChannelSnapshot {
        ChannelSnapshot::new(ChannelId::new(5), GuildId::new(1), ChannelKind::Text, "general")
    }

    #[tokio::test]
    async fn test_channel_update_is_logged() {
        let cog = cog_with_log_channel().await;
        let mut dispatcher = MockLogDispatcher::new();
        dispatcher.expect_channel_exists().return_const(true);
        dispatcher
            .expect_send_embed()
            .withf(|channel, embed| {
                *channel == ChannelId::new(99) && embed.after == vec!["**Topic:** rules".to_string()]
            })
            .times(1)
            .returning(|_, _| Ok(()));

        cog.handle(&update(channel(), channel().with_topic("rules")), &dispatcher)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unchanged_channel_is_not_logged() {
        let cog = cog_with_log_channel().await;
        let mut dispatcher = MockLogDispatcher::new();
        dispatcher.expect_channel_exists().never();
        dispatcher.expect_send_embed().never();

        cog.handle(&update(channel(), channel()), &dispatcher).await.unwrap();
    }

    #[tokio::test]
    async fn test_other_events_are_ignored() {
        let cog = cog_with_log_channel().await;
        let dispatcher = MockLogDispatcher::new();
        let event = BotEvent::GuildUpdate {
            guild_id: GuildId::new(1),
        };
        cog.handle(&event, &dispatcher).await.unwrap();
    }
}
