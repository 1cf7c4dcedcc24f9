//! The platform side of log delivery.

use crate::embed::DiffEmbed;
use async_trait::async_trait;
use serenity::all::{Cache, ChannelId, Context, CreateMessage, GuildId, Http};
use std::sync::Arc;
use tracing::debug;

/// Delivers log embeds to guild channels.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogDispatcher: Send + Sync {
    /// Whether `channel` is currently one of `guild`'s channels.
    fn channel_exists(&self, guild: GuildId, channel: ChannelId) -> bool;

    /// Posts `embed` to `channel`.
    async fn send_embed(&self, channel: ChannelId, embed: &DiffEmbed) -> serenity::Result<()>;
}

/// Dispatcher backed by the gateway cache and the HTTP client.
#[derive(Clone)]
pub struct SerenityDispatcher {
    cache: Arc<Cache>,
    http: Arc<Http>,
}

impl SerenityDispatcher {
    /// Creates a dispatcher from the client's cache and HTTP handles.
    pub const fn new(cache: Arc<Cache>, http: Arc<Http>) -> Self {
        Self { cache, http }
    }

    /// Creates a dispatcher from an event context.
    pub fn from_context(ctx: &Context) -> Self {
        Self::new(Arc::clone(&ctx.cache), Arc::clone(&ctx.http))
    }
}

#[async_trait]
impl LogDispatcher for SerenityDispatcher {
    fn channel_exists(&self, guild: GuildId, channel: ChannelId) -> bool {
        self.cache
            .guild(guild)
            .is_some_and(|cached| cached.channels.contains_key(&channel))
    }

    async fn send_embed(&self, channel: ChannelId, embed: &DiffEmbed) -> serenity::Result<()> {
        debug!(%channel, title = %embed.title, "Sending log embed");
        channel
            .send_message(self.http.as_ref(), CreateMessage::new().embed(embed.to_create_embed()))
            .await?;
        Ok(())
    }
}
