//! Point-in-time views of the entities the formatters compare.

use serenity::all::{
    ChannelId, ChannelType, GuildChannel, GuildId, PermissionOverwriteType, Permissions, RoleId,
    UserId,
};
use std::collections::BTreeMap;

/// Kind of guild channel, as far as change logging cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Text and announcement channels.
    Text,
    /// Voice and stage channels.
    Voice,
    /// Channel categories.
    Category,
    /// Anything else (forums, threads, ...).
    Other,
}

impl ChannelKind {
    /// Maps the platform channel type.
    pub fn from_channel_type(kind: ChannelType) -> Self {
        match kind {
            ChannelType::Text | ChannelType::News => Self::Text,
            ChannelType::Voice | ChannelType::Stage => Self::Voice,
            ChannelType::Category => Self::Category,
            _ => Self::Other,
        }
    }

    /// Human name used in embed titles, e.g. `Text channel`.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Text => "Text channel",
            Self::Voice => "Voice channel",
            Self::Category => "Category channel",
            Self::Other => "Channel",
        }
    }
}

/// Who a permission overwrite applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OverwriteSubject {
    /// A role; the role sharing the guild id is `@everyone`.
    Role(RoleId),
    /// A single member.
    Member(UserId),
}

impl OverwriteSubject {
    /// Mention of the subject as rendered in `guild_id`.
    pub fn mention(self, guild_id: GuildId) -> String {
        match self {
            Self::Role(role) if role.get() == guild_id.get() => "@everyone".to_string(),
            Self::Role(role) => format!("<@&{role}>"),
            Self::Member(user) => format!("<@{user}>"),
        }
    }
}

/// Allow/deny sets of one overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overwrite {
    /// Explicitly granted permissions.
    pub allow: Permissions,
    /// Explicitly denied permissions.
    pub deny: Permissions,
}

impl Overwrite {
    /// Creates an overwrite from allow and deny sets.
    pub const fn new(allow: Permissions, deny: Permissions) -> Self {
        Self { allow, deny }
    }

    /// Overwrite with every permission unset.
    pub const fn empty() -> Self {
        Self::new(Permissions::empty(), Permissions::empty())
    }

    /// Tri-state of a single permission: granted, denied or unset.
    pub fn state(&self, permission: Permissions) -> Option<bool> {
        if self.allow.contains(permission) {
            Some(true)
        } else if self.deny.contains(permission) {
            Some(false)
        } else {
            None
        }
    }
}

/// Immutable view of a guild channel's attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSnapshot {
    /// Channel id.
    pub id: ChannelId,
    /// Guild the channel belongs to.
    pub guild_id: GuildId,
    /// Channel kind.
    pub kind: ChannelKind,
    /// Channel name.
    pub name: String,
    /// Topic, if any.
    pub topic: Option<String>,
    /// Age restriction flag.
    pub nsfw: bool,
    /// Slowmode delay in seconds.
    pub slowmode_delay: u64,
    /// Bitrate in bits per second (voice only).
    pub bitrate: Option<u32>,
    /// Maximum number of users (voice only).
    pub user_limit: Option<u32>,
    /// Display name of the parent category.
    pub category: Option<String>,
    /// Permission overwrites by subject.
    pub overwrites: BTreeMap<OverwriteSubject, Overwrite>,
}

impl Default for Overwrite {
    fn default() -> Self {
        Self::empty()
    }
}

impl ChannelSnapshot {
    /// Creates a snapshot with only the identifying attributes set.
    pub fn new(id: ChannelId, guild_id: GuildId, kind: ChannelKind, name: impl Into<String>) -> Self {
        Self {
            id,
            guild_id,
            kind,
            name: name.into(),
            topic: None,
            nsfw: false,
            slowmode_delay: 0,
            bitrate: None,
            user_limit: None,
            category: None,
            overwrites: BTreeMap::new(),
        }
    }

    /// Captures a platform channel. `category` is the resolved display name
    /// of the parent category, if the channel has one.
    pub fn from_guild_channel(channel: &GuildChannel, category: Option<String>) -> Self {
        let overwrites = channel
            .permission_overwrites
            .iter()
            .filter_map(|overwrite| {
                let subject = match overwrite.kind {
                    PermissionOverwriteType::Role(role) => OverwriteSubject::Role(role),
                    PermissionOverwriteType::Member(user) => OverwriteSubject::Member(user),
                    _ => return None,
                };
                Some((subject, Overwrite::new(overwrite.allow, overwrite.deny)))
            })
            .collect();

        Self {
            id: channel.id,
            guild_id: channel.guild_id,
            kind: ChannelKind::from_channel_type(channel.kind),
            name: channel.name.clone(),
            topic: channel.topic.clone(),
            nsfw: channel.nsfw,
            slowmode_delay: channel.rate_limit_per_user.map_or(0, u64::from),
            bitrate: channel.bitrate,
            user_limit: channel.user_limit,
            category,
            overwrites,
        }
    }

    /// Sets the topic.
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Sets the NSFW flag.
    #[must_use]
    pub const fn with_nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = nsfw;
        self
    }

    /// Sets the slowmode delay in seconds.
    #[must_use]
    pub const fn with_slowmode_delay(mut self, seconds: u64) -> Self {
        self.slowmode_delay = seconds;
        self
    }

    /// Sets the bitrate in bits per second.
    #[must_use]
    pub const fn with_bitrate(mut self, bitrate: u32) -> Self {
        self.bitrate = Some(bitrate);
        self
    }

    /// Sets the user limit.
    #[must_use]
    pub const fn with_user_limit(mut self, limit: u32) -> Self {
        self.user_limit = Some(limit);
        self
    }

    /// Sets the parent category display name.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Adds or replaces the overwrite for `subject`.
    #[must_use]
    pub fn with_overwrite(mut self, subject: OverwriteSubject, overwrite: Overwrite) -> Self {
        self.overwrites.insert(subject, overwrite);
        self
    }

    /// Overwrite for `subject`; subjects without one have every permission unset.
    pub fn overwrite_for(&self, subject: OverwriteSubject) -> Overwrite {
        self.overwrites.get(&subject).copied().unwrap_or_default()
    }

    /// Channel mention.
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}

/// The member a voice state belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    /// User id.
    pub user_id: UserId,
    /// Avatar shown as embed thumbnail.
    pub avatar_url: Option<String>,
}

impl MemberRef {
    /// User mention.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.user_id)
    }
}

/// Server-visible parts of a member's voice state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoiceSnapshot {
    /// Connected channel, if any.
    pub channel: Option<ChannelId>,
    /// Connected to the guild's AFK channel.
    pub afk: bool,
    /// Deafened by the server.
    pub deaf: bool,
    /// Muted by the server.
    pub mute: bool,
}

impl VoiceSnapshot {
    /// Snapshot of an observed voice state; `afk` is set when the member sits
    /// in the guild's AFK channel.
    pub fn observe(
        channel: Option<ChannelId>,
        afk_channel: Option<ChannelId>,
        deaf: bool,
        mute: bool,
    ) -> Self {
        Self {
            channel,
            afk: channel.is_some() && channel == afk_channel,
            deaf,
            mute,
        }
    }

    /// Snapshot of a member connected to `channel`.
    pub const fn connected(channel: ChannelId) -> Self {
        Self {
            channel: Some(channel),
            afk: false,
            deaf: false,
            mute: false,
        }
    }
}
