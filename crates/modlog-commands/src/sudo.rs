//! Owner-only `sudo` command group.

use crate::framework::{Context, Error};
use modlog_cogs::{EventRouter, RouterError};
use modlog_common::stringify_reldelta;
use poise::serenity_prelude as serenity;
use tracing::{info, warn};

/// Shown to anyone outside the owner allow-list.
pub const OWNER_ONLY_MESSAGE: &str = "This is an Owner-only command, you cannot invoke this.";

/// Reply for a successful cog operation.
pub const OK_REPLY: &str = "\u{1f197}";

/// Cog operation run by `load`, `reload` and `unload`.
pub type CogOperation = fn(&EventRouter, &str) -> Result<(), RouterError>;

/// Lets configured owners through and tells everyone else off.
///
/// # Errors
///
/// Returns an error if the rejection embed cannot be sent.
pub async fn owner_check(ctx: Context<'_>) -> Result<bool, Error> {
    if ctx.data().config.is_owner(ctx.author().id.get()) {
        return Ok(true);
    }

    warn!("User {} tried to run '{}'", ctx.author().id, ctx.command().qualified_name);
    let embed = serenity::CreateEmbed::new()
        .description(OWNER_ONLY_MESSAGE)
        .colour(serenity::Colour::RED);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(false)
}

/// Administrative information.
#[poise::command(
    prefix_command,
    hide_in_help,
    check = "owner_check",
    subcommands("shutdown", "restart", "load", "reload", "unload", "stats")
)]
pub async fn sudo(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Turn the bot off.
#[poise::command(prefix_command, check = "owner_check")]
pub async fn shutdown(ctx: Context<'_>) -> Result<(), Error> {
    acknowledge(ctx).await?;
    info!("Shutdown requested by {}", ctx.author().id);
    ctx.framework().shard_manager().shutdown_all().await;
    Ok(())
}

/// Restart the bot.
#[poise::command(prefix_command, check = "owner_check")]
pub async fn restart(ctx: Context<'_>) -> Result<(), Error> {
    acknowledge(ctx).await?;
    info!("Restart requested by {}", ctx.author().id);
    ctx.data().lifecycle.request_restart();
    ctx.framework().shard_manager().shutdown_all().await;
    Ok(())
}

/// Load a cog, or every cog when none is named.
#[poise::command(prefix_command, check = "owner_check")]
pub async fn load(ctx: Context<'_>, cog: Option<String>) -> Result<(), Error> {
    reply_each(ctx, run_cog_operation(&ctx.data().router, cog.as_deref(), EventRouter::load)).await
}

/// Reload a cog, or every cog when none is named.
#[poise::command(prefix_command, check = "owner_check")]
pub async fn reload(ctx: Context<'_>, cog: Option<String>) -> Result<(), Error> {
    reply_each(ctx, run_cog_operation(&ctx.data().router, cog.as_deref(), EventRouter::reload)).await
}

/// Unload a cog, or every cog when none is named.
#[poise::command(prefix_command, check = "owner_check")]
pub async fn unload(ctx: Context<'_>, cog: Option<String>) -> Result<(), Error> {
    reply_each(ctx, run_cog_operation(&ctx.data().router, cog.as_deref(), EventRouter::unload)).await
}

/// Show full bot stats.
#[poise::command(prefix_command, check = "owner_check")]
pub async fn stats(ctx: Context<'_>) -> Result<(), Error> {
    let (name, avatar) = {
        let user = ctx.cache().current_user();
        (user.name.clone(), user.face())
    };
    let general = general_stats(
        ctx.cache().guild_count(),
        ctx.framework().options().commands.len(),
        ctx.cache().user_count(),
        ctx.data().lifecycle.uptime(),
    );
    let creator = ctx.data().config.get().bot.creator.clone();

    let embed = serenity::CreateEmbed::new()
        .title("BOT STATISTICS")
        .colour(serenity::Colour::BLUE)
        .field("**❯❯ General**", general, true)
        .field("**❯❯ System**", system_stats(), true)
        .author(serenity::CreateEmbedAuthor::new(format!("{name}'s Stats")).icon_url(avatar))
        .footer(serenity::CreateEmbedFooter::new(format!("Made by {creator} Team.")));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Applies `operation` to `cog`, or to every registered cog, and returns
/// one reply per cog.
pub fn run_cog_operation(router: &EventRouter, cog: Option<&str>, operation: CogOperation) -> Vec<String> {
    let targets = cog.map_or_else(|| router.names(), |name| vec![name]);
    targets
        .into_iter()
        .map(|name| match operation(router, name) {
            Ok(()) => OK_REPLY.to_string(),
            Err(e) => format!("```\n{e}\n```"),
        })
        .collect()
}

/// The "General" stats block.
pub fn general_stats(servers: usize, commands: usize, members: usize, uptime: chrono::Duration) -> String {
    format!(
        "• Servers: **`{servers}`**\n\
         • Commands: **`{commands}`**\n\
         • Members: **`{members}`**\n\
         • Started: **{}**",
        stringify_reldelta(uptime)
    )
}

/// The "System" stats block.
pub fn system_stats() -> String {
    format!(
        "• Version: **`{}`**\n• Library: **`{}`**",
        env!("CARGO_PKG_VERSION"),
        ::serenity::constants::USER_AGENT
    )
}

async fn acknowledge(ctx: Context<'_>) -> Result<(), Error> {
    if let poise::Context::Prefix(prefix) = ctx {
        prefix.msg.react(ctx.serenity_context(), '✅').await?;
    }
    Ok(())
}

async fn reply_each(ctx: Context<'_>, replies: Vec<String>) -> Result<(), Error> {
    for reply in replies {
        ctx.say(reply).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modlog_cogs::{BotEvent, Cog, CogError, EventKind, LogDispatcher};
    use std::sync::Arc;

    struct NamedCog(&'static str);

    #[async_trait::async_trait]
    impl Cog for NamedCog {
        fn name(&self) -> &'static str {
            self.0
        }

        fn subscriptions(&self) -> &'static [EventKind] {
            &[]
        }

        async fn handle(&self, _event: &BotEvent, _dispatcher: &dyn LogDispatcher) -> Result<(), CogError> {
            Ok(())
        }
    }

    fn router() -> EventRouter {
        EventRouter::new(vec![
            Arc::new(NamedCog("server_log")) as Arc<dyn Cog>,
            Arc::new(NamedCog("voice_log")),
        ])
    }

    #[test]
    fn test_unload_single_cog() {
        let router = router();
        let replies = run_cog_operation(&router, Some("voice_log"), EventRouter::unload);
        assert_eq!(replies, vec![OK_REPLY.to_string()]);
        assert!(!router.is_loaded("voice_log"));
        assert!(router.is_loaded("server_log"));
    }

    #[test]
    fn test_unknown_cog_reports_error() {
        let router = router();
        let replies = run_cog_operation(&router, Some("music"), EventRouter::load);
        assert_eq!(replies, vec!["```\nNo cog named 'music'\n```".to_string()]);
    }

    #[test]
    fn test_operation_without_name_hits_every_cog() {
        let router = router();
        router.unload("server_log").unwrap();

        let replies = run_cog_operation(&router, None, EventRouter::load);
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0], OK_REPLY);
        assert!(replies[1].contains("already loaded"));

        let replies = run_cog_operation(&router, None, EventRouter::reload);
        assert!(replies.iter().all(|reply| reply == OK_REPLY));
    }

    #[test]
    fn test_general_stats_block() {
        let block = general_stats(3, 2, 150, chrono::Duration::seconds(3_660));
        assert!(block.contains("Servers: **`3`**"));
        assert!(block.contains("Commands: **`2`**"));
        assert!(block.contains("Members: **`150`**"));
        assert!(block.contains("Started: **1 hour and 1 minute**"));
    }

    #[test]
    fn test_sudo_group_is_hidden_and_gated() {
        let command = sudo();
        assert!(command.hide_in_help);
        assert_eq!(command.checks.len(), 1);
        assert_eq!(command.subcommands.len(), 6);
        assert!(command.subcommands.iter().all(|sub| sub.checks.len() == 1));
    }
}
