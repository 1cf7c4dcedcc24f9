//! Voice state diffing.

use crate::embed::DiffEmbed;
use crate::snapshot::{MemberRef, VoiceSnapshot};
use serenity::all::{ChannelId, Colour};

fn channel_mention(channel: ChannelId) -> String {
    format!("<#{channel}>")
}

/// Formats a member's voice state change.
///
/// Only server-visible changes are reported, in priority order: AFK,
/// channel, server deafen, server mute. Client-side actions (self mute,
/// self deafen, streaming, video) yield `None`.
pub fn format_voice_update(
    member: &MemberRef,
    before: &VoiceSnapshot,
    after: &VoiceSnapshot,
) -> Option<DiffEmbed> {
    let user = format!("**User:** {}", member.mention());

    let (title, description, colour) = if before.afk != after.afk {
        let title = if after.afk {
            "User went AFK"
        } else {
            "User is no longer AFK"
        };
        (title, user, Colour::BLUE)
    } else if before.channel != after.channel {
        match (before.channel, after.channel) {
            (None, Some(new)) => (
                "User joined voice channel",
                format!("{user}\n**Channel:** {}", channel_mention(new)),
                Colour::BLUE,
            ),
            (Some(old), Some(new)) => (
                "User changed channels",
                format!(
                    "{user}\n**Channel:** {}\n**New Channel:** {}",
                    channel_mention(old),
                    channel_mention(new)
                ),
                Colour::BLUE,
            ),
            (Some(old), None) => (
                "User left voice channel",
                format!("{user}\n**Channel:** {}", channel_mention(old)),
                Colour::BLUE,
            ),
            (None, None) => return None,
        }
    } else if before.deaf != after.deaf {
        let title = if after.deaf {
            "User deafened"
        } else {
            "User undeafened"
        };
        (title, user, Colour::DARK_ORANGE)
    } else if before.mute != after.mute {
        let title = if after.mute {
            "User silenced"
        } else {
            "User unsilenced"
        };
        (title, user, Colour::DARK_ORANGE)
    } else {
        return None;
    };

    Some(DiffEmbed::new(title, description, colour).with_thumbnail(member.avatar_url.clone()))
}
