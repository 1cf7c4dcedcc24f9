//! `logchannel` commands for choosing where each log category is posted.

use crate::framework::{Context, Error};
use modlog_common::LogCategory;
use poise::serenity_prelude as serenity;
use tracing::info;

/// Manage the channels logs are posted in.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    subcommands("set", "clear", "show")
)]
pub async fn logchannel(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Post a log category in a channel.
#[poise::command(prefix_command, slash_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn set(
    ctx: Context<'_>,
    #[description = "server_log or voice_log"] category: String,
    #[description = "Channel to post the logs in"] channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let category = match category.parse::<LogCategory>() {
        Ok(category) => category,
        Err(e) => {
            ctx.say(e.to_string()).await?;
            return Ok(());
        }
    };
    if channel.guild_id != guild_id {
        ctx.say("That channel is not in this server.").await?;
        return Ok(());
    }

    ctx.data()
        .store
        .set_log_channel(category, guild_id, channel.id)
        .await?;
    info!("Guild {} now logs {} to {}", guild_id, category, channel.id);
    ctx.say(format!("**{category}** will be posted in <#{}>.", channel.id))
        .await?;
    Ok(())
}

/// Stop posting a log category.
#[poise::command(prefix_command, slash_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn clear(
    ctx: Context<'_>,
    #[description = "server_log or voice_log"] category: String,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let category = match category.parse::<LogCategory>() {
        Ok(category) => category,
        Err(e) => {
            ctx.say(e.to_string()).await?;
            return Ok(());
        }
    };

    let removed = ctx.data().store.clear_log_channel(category, guild_id).await?;
    let reply = if removed {
        info!("Guild {} stopped logging {}", guild_id, category);
        format!("**{category}** is no longer posted.")
    } else {
        format!("**{category}** was not configured.")
    };
    ctx.say(reply).await?;
    Ok(())
}

/// Show the configured log channels.
#[poise::command(prefix_command, slash_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn show(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let configured = ctx.data().store.log_channels_for(guild_id).await?;

    let embed = serenity::CreateEmbed::new()
        .title("Log channels")
        .description(describe_log_channels(&configured))
        .colour(serenity::Colour::BLUE);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// One line per category, configured or not.
pub fn describe_log_channels(configured: &[(LogCategory, serenity::ChannelId)]) -> String {
    LogCategory::ALL
        .into_iter()
        .map(|category| {
            let target = configured
                .iter()
                .find(|(c, _)| *c == category)
                .map_or_else(|| "not set".to_string(), |(_, channel)| format!("<#{channel}>"));
            format!("**{category}:** {target}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
