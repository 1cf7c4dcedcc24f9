//! Poise framework setup, shared data and the gateway event hook.

use crate::lifecycle::Lifecycle;
use modlog_cogs::{BotEvent, EventRouter, LogChannelStore, SerenityDispatcher};
use modlog_config::ConfigCache;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{debug, error, trace};

/// Application data accessible in all commands.
pub struct Data {
    /// Live configuration.
    pub config: Arc<ConfigCache>,
    /// Cog registry and event table.
    pub router: Arc<EventRouter>,
    /// Log channel configuration.
    pub store: Arc<dyn LogChannelStore>,
    /// Uptime and restart flag.
    pub lifecycle: Arc<Lifecycle>,
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Every command the bot registers.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![crate::sudo::sudo(), crate::log_channel::logchannel()]
}

/// Creates a new Poise framework listening on `prefix`.
pub fn create_framework(prefix: impl Into<String>) -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(poise::FrameworkOptions {
        commands: commands(),
        on_error: |error| Box::pin(on_error(error)),
        event_handler: |ctx, event, framework, data| Box::pin(event_handler(ctx, event, framework, data)),
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(prefix.into()),
            mention_as_prefix: true,
            ..Default::default()
        },
        ..Default::default()
    })
}

/// Global error handler for the framework.
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command '{}': {:?}", ctx.command().qualified_name, error);
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!("Error in event handler for {:?}: {:?}", event.snake_case_name(), error);
        }
        // The check already answered the caller.
        poise::FrameworkError::CommandCheckFailed { error: None, ctx, .. } => {
            debug!(
                "Check rejected '{}' for user {}",
                ctx.command().qualified_name,
                ctx.author().id
            );
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {:?}", e);
            }
        }
    }
}

/// Converts gateway events into cog events and routes them.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Ready { data_about_bot } = event {
        debug!("Ready event received for {}", data_about_bot.user.name);
    }

    let Some(bot_event) = BotEvent::from_full_event(&ctx.cache, event) else {
        return Ok(());
    };
    trace!("Routing {:?} for guild {}", bot_event.kind(), bot_event.guild_id());

    let dispatcher = SerenityDispatcher::from_context(ctx);
    data.router.dispatch(&bot_event, &dispatcher).await;
    Ok(())
}
