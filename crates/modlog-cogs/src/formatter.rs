//! Channel update diffing.
//!
//! Permission overwrite changes and attribute changes never share an embed:
//! when the overwrites differ only the permission diff is considered.

use crate::embed::DiffEmbed;
use crate::fields::fields_for;
use crate::snapshot::{ChannelKind, ChannelSnapshot, Overwrite};
use serenity::all::{Colour, Permissions};
use std::collections::BTreeSet;
use tracing::trace;

/// Arrow between the old and new permission state.
pub const PERMISSION_ARROW: &str = "➜";

/// Renders a permission tri-state.
pub const fn permission_symbol(state: Option<bool>) -> &'static str {
    match state {
        Some(true) => "✅",
        Some(false) => "❌",
        None => "⬜",
    }
}

/// `SEND_MESSAGES` → `Send messages`.
pub fn readable_permission_name(flag_name: &str) -> String {
    let spaced = flag_name.replace('_', " ").to_lowercase();
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

const fn update_title(kind: ChannelKind) -> Option<&'static str> {
    match kind {
        ChannelKind::Text => Some("Text Channel updated"),
        ChannelKind::Voice => Some("Voice Channel updated"),
        ChannelKind::Category => Some("Category Channel updated"),
        ChannelKind::Other => None,
    }
}

/// Formats the change between two snapshots of the same channel.
///
/// Returns `None` when nothing tracked changed, which means no log entry.
pub fn format_channel_update(before: &ChannelSnapshot, after: &ChannelSnapshot) -> Option<DiffEmbed> {
    if before.overwrites != after.overwrites {
        return format_permission_update(before, after);
    }

    let title = update_title(before.kind)?;

    let (before_lines, after_lines): (Vec<String>, Vec<String>) = fields_for(before.kind)
        .iter()
        .filter_map(|spec| spec.diff(before, after))
        .unzip();

    if after_lines.is_empty() {
        trace!(channel = %after.id, "Channel update without tracked changes");
        return None;
    }

    Some(
        DiffEmbed::new(
            title,
            format!("**Channel:** {}", after.mention()),
            Colour::DARK_BLUE,
        )
        .with_columns(before_lines, after_lines),
    )
}

/// Formats the overwrite changes between two snapshots.
///
/// Subjects whose overwrite only moved between "absent" and "present but
/// empty" produce no lines; if no subject produces lines the result is `None`.
pub fn format_permission_update(before: &ChannelSnapshot, after: &ChannelSnapshot) -> Option<DiffEmbed> {
    let subjects: BTreeSet<_> = before
        .overwrites
        .keys()
        .chain(after.overwrites.keys())
        .copied()
        .collect();

    let mut lines = Vec::new();
    for subject in subjects {
        let old = before.overwrite_for(subject);
        let new = after.overwrite_for(subject);
        if old == new {
            continue;
        }

        let changes = permission_changes(&old, &new);
        if changes.is_empty() {
            continue;
        }

        lines.push(format!(
            "**Overwrite changes for {}:**",
            subject.mention(after.guild_id)
        ));
        lines.extend(changes);
    }

    if lines.is_empty() {
        trace!(channel = %after.id, "Overwrite update without permission changes");
        return None;
    }

    let description = format!(
        "{} permissions have been updated.\n\n{}",
        after.mention(),
        lines.join("\n")
    );

    Some(DiffEmbed::new(
        format!("{} permissions updated", before.kind.display_name()),
        description,
        Colour::DARK_BLUE,
    ))
}

fn permission_changes(old: &Overwrite, new: &Overwrite) -> Vec<String> {
    Permissions::all()
        .iter_names()
        .filter_map(|(name, permission)| {
            let was = old.state(permission);
            let now = new.state(permission);
            (was != now).then(|| {
                format!(
                    "**`{}:`** {} {PERMISSION_ARROW} {}",
                    readable_permission_name(name),
                    permission_symbol(was),
                    permission_symbol(now)
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::OverwriteSubject;
    use serenity::all::{ChannelId, GuildId, RoleId, UserId};

    const GUILD: u64 = 100;

    fn text_channel() -> ChannelSnapshot {
        ChannelSnapshot::new(ChannelId::new(1), GuildId::new(GUILD), ChannelKind::Text, "general")
            .with_topic("Talk here")
    }

    fn voice_channel() -> ChannelSnapshot {
        ChannelSnapshot::new(ChannelId::new(2), GuildId::new(GUILD), ChannelKind::Voice, "Lounge")
            .with_bitrate(64_000)
            .with_user_limit(0)
    }

    #[test]
    fn test_readable_permission_name() {
        assert_eq!(readable_permission_name("SEND_MESSAGES"), "Send messages");
        assert_eq!(readable_permission_name("ADMINISTRATOR"), "Administrator");
        assert_eq!(readable_permission_name(""), "");
    }

    #[test]
    fn test_identical_snapshots_yield_nothing() {
        assert!(format_channel_update(&text_channel(), &text_channel()).is_none());
        assert!(format_channel_update(&voice_channel(), &voice_channel()).is_none());
    }

    #[test]
    fn test_topic_change() {
        let after = text_channel().with_topic("Talk there");
        let embed = format_channel_update(&text_channel(), &after).unwrap();

        assert_eq!(embed.title, "Text Channel updated");
        assert_eq!(embed.description, "**Channel:** <#1>");
        assert_eq!(embed.before, vec!["**Topic:** Talk here"]);
        assert_eq!(embed.after, vec!["**Topic:** Talk there"]);
        assert_eq!(embed.colour, Colour::DARK_BLUE);
    }

    #[test]
    fn test_lines_follow_declaration_order() {
        let mut after = text_channel().with_nsfw(true).with_category("Community");
        after.name = "chat".to_string();

        let embed = format_channel_update(&text_channel(), &after).unwrap();
        assert_eq!(
            embed.after,
            vec!["**Name:** chat", "**NSFW:** Yes", "**Category:** Community"]
        );
        assert_eq!(
            embed.before,
            vec!["**Name:** general", "**NSFW:** No", "**Category:** None"]
        );
    }

    #[test]
    fn test_slowmode_zero_renders_as_none() {
        let slow = text_channel().with_slowmode_delay(30);
        let embed = format_channel_update(&slow, &text_channel()).unwrap();

        assert_eq!(embed.before, vec!["**Slowmode delay:** 30s"]);
        assert_eq!(embed.after, vec!["**Slowmode delay:** None"]);
    }

    #[test]
    fn test_voice_fields() {
        let after = voice_channel().with_bitrate(96_000).with_user_limit(10);
        let embed = format_channel_update(&voice_channel(), &after).unwrap();

        assert_eq!(embed.title, "Voice Channel updated");
        assert_eq!(embed.before, vec!["**Bitrate:** 64kbps", "**User limit:** 0"]);
        assert_eq!(embed.after, vec!["**Bitrate:** 96kbps", "**User limit:** 10"]);
    }

    #[test]
    fn test_voice_ignores_text_only_fields() {
        let after = voice_channel().with_topic("ignored");
        assert!(format_channel_update(&voice_channel(), &after).is_none());
    }

    #[test]
    fn test_category_fields() {
        let before = ChannelSnapshot::new(ChannelId::new(3), GuildId::new(GUILD), ChannelKind::Category, "Info");
        let after = before.clone().with_nsfw(true);

        let embed = format_channel_update(&before, &after).unwrap();
        assert_eq!(embed.title, "Category Channel updated");
        assert_eq!(embed.after, vec!["**NSFW:** Yes"]);
    }

    #[test]
    fn test_untracked_kind_yields_nothing() {
        let before = ChannelSnapshot::new(ChannelId::new(4), GuildId::new(GUILD), ChannelKind::Other, "forum");
        let mut after = before.clone();
        after.name = "renamed".to_string();
        assert!(format_channel_update(&before, &after).is_none());
    }

    #[test]
    fn test_permission_flip_for_one_subject() {
        let unchanged = OverwriteSubject::Role(RoleId::new(7));
        let flipped = OverwriteSubject::Member(UserId::new(8));
        let steady = Overwrite::new(Permissions::VIEW_CHANNEL, Permissions::empty());

        let before = text_channel()
            .with_overwrite(unchanged, steady)
            .with_overwrite(flipped, Overwrite::new(Permissions::empty(), Permissions::SEND_MESSAGES));
        let after = text_channel()
            .with_overwrite(unchanged, steady)
            .with_overwrite(flipped, Overwrite::new(Permissions::SEND_MESSAGES, Permissions::empty()));

        let embed = format_channel_update(&before, &after).unwrap();
        assert_eq!(embed.title, "Text channel permissions updated");
        assert!(!embed.has_columns());
        assert_eq!(embed.description.matches("Overwrite changes for").count(), 1);
        assert!(embed.description.contains("**Overwrite changes for <@8>:**"));
        assert!(!embed.description.contains("<@&7>"));
        assert_eq!(embed.description.matches(PERMISSION_ARROW).count(), 1);
        assert!(embed.description.contains("**`Send messages:`** ❌ ➜ ✅"));
    }

    #[test]
    fn test_permission_change_skips_field_diff() {
        let subject = OverwriteSubject::Role(RoleId::new(GUILD));
        let mut after = text_channel()
            .with_topic("New topic")
            .with_overwrite(subject, Overwrite::new(Permissions::empty(), Permissions::SEND_MESSAGES));
        after.name = "renamed".to_string();

        let embed = format_channel_update(&text_channel(), &after).unwrap();
        assert_eq!(embed.title, "Text channel permissions updated");
        assert!(embed.description.starts_with("<#1> permissions have been updated.\n\n"));
        assert!(embed.description.contains("**Overwrite changes for @everyone:**"));
        assert!(embed.description.contains("**`Send messages:`** ⬜ ➜ ❌"));
        assert!(!embed.description.contains("Topic"));
    }

    #[test]
    fn test_removed_overwrite_reports_unset() {
        let subject = OverwriteSubject::Member(UserId::new(9));
        let before = voice_channel().with_overwrite(
            subject,
            Overwrite::new(Permissions::CONNECT | Permissions::SPEAK, Permissions::empty()),
        );

        let embed = format_channel_update(&before, &voice_channel()).unwrap();
        assert_eq!(embed.title, "Voice channel permissions updated");
        assert!(embed.description.contains("**`Connect:`** ✅ ➜ ⬜"));
        assert!(embed.description.contains("**`Speak:`** ✅ ➜ ⬜"));
    }

    #[test]
    fn test_empty_overwrite_added_is_suppressed() {
        let after = text_channel().with_overwrite(OverwriteSubject::Role(RoleId::new(5)), Overwrite::empty());
        assert!(format_channel_update(&text_channel(), &after).is_none());
    }

    #[test]
    fn test_empty_overwrite_hides_field_changes() {
        let after = text_channel()
            .with_topic("changed")
            .with_overwrite(OverwriteSubject::Role(RoleId::new(5)), Overwrite::empty());
        assert!(format_channel_update(&text_channel(), &after).is_none());
    }
}
