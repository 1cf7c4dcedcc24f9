//! Voice log cog: voice state changes to the `voice_log` channel.

use crate::cog::Cog;
use crate::dispatcher::LogDispatcher;
use crate::error::CogError;
use crate::event::{BotEvent, EventKind};
use crate::resolver::LogChannelResolver;
use crate::voice::format_voice_update;
use async_trait::async_trait;
use modlog_common::LogCategory;
use std::sync::Arc;

/// Logs members joining, leaving, moving and being moderated in voice.
pub struct VoiceLog {
    resolver: Arc<LogChannelResolver>,
}

impl VoiceLog {
    /// Cog name.
    pub const NAME: &'static str = "voice_log";

    /// Creates the cog.
    pub fn new(resolver: Arc<LogChannelResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Cog for VoiceLog {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn subscriptions(&self) -> &'static [EventKind] {
        &[EventKind::VoiceStateUpdate]
    }

    async fn handle(&self, event: &BotEvent, dispatcher: &dyn LogDispatcher) -> Result<(), CogError> {
        let BotEvent::VoiceStateUpdate {
            guild_id,
            member,
            before,
            after,
        } = event
        else {
            return Ok(());
        };

        if let Some(embed) = format_voice_update(member, before, after) {
            self.resolver
                .resolve_and_send(*guild_id, LogCategory::VoiceLog, &embed, dispatcher)
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::MockLogDispatcher;
    use crate::snapshot::{MemberRef, VoiceSnapshot};
    use crate::store::{LogChannelStore, MemoryLogChannelStore};
    use serenity::all::{ChannelId, GuildId, UserId};

    fn join_event() -> BotEvent {
        BotEvent::VoiceStateUpdate {
            guild_id: GuildId::new(1),
            member: MemberRef {
                user_id: UserId::new(2),
                avatar_url: None,
            },
            before: VoiceSnapshot::default(),
            after: VoiceSnapshot::connected(ChannelId::new(3)),
        }
    }

    #[tokio::test]
    async fn test_join_goes_to_voice_log() {
        let store = MemoryLogChannelStore::new();
        store
            .set_log_channel(LogCategory::VoiceLog, GuildId::new(1), ChannelId::new(50))
            .await
            .unwrap();
        store
            .set_log_channel(LogCategory::ServerLog, GuildId::new(1), ChannelId::new(60))
            .await
            .unwrap();
        let cog = VoiceLog::new(Arc::new(LogChannelResolver::new(Arc::new(store))));

        let mut dispatcher = MockLogDispatcher::new();
        dispatcher.expect_channel_exists().return_const(true);
        dispatcher
            .expect_send_embed()
            .withf(|channel, embed| *channel == ChannelId::new(50) && embed.title == "User joined voice channel")
            .times(1)
            .returning(|_, _| Ok(()));

        cog.handle(&join_event(), &dispatcher).await.unwrap();
    }

    #[tokio::test]
    async fn test_unconfigured_voice_log_is_skipped() {
        let cog = VoiceLog::new(Arc::new(LogChannelResolver::new(Arc::new(
            MemoryLogChannelStore::new(),
        ))));
        let mut dispatcher = MockLogDispatcher::new();
        dispatcher.expect_send_embed().never();

        cog.handle(&join_event(), &dispatcher).await.unwrap();
    }
}
