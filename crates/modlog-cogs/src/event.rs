//! Platform events in the shape the cogs consume.

use crate::snapshot::{ChannelSnapshot, MemberRef, VoiceSnapshot};
use serenity::all::{Cache, ChannelId, FullEvent, GuildChannel, GuildId, RoleId, VoiceState};
use std::collections::HashMap;
use tracing::trace;

/// Event kinds a cog can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A guild channel changed.
    ChannelUpdate,
    /// A guild channel was created.
    ChannelCreate,
    /// A guild channel was deleted.
    ChannelDelete,
    /// A role was created.
    RoleCreate,
    /// A role was deleted.
    RoleDelete,
    /// A role changed.
    RoleUpdate,
    /// Guild settings changed.
    GuildUpdate,
    /// A member's voice state changed.
    VoiceStateUpdate,
}

/// An inbound event with the snapshots needed to describe it.
#[derive(Debug, Clone)]
pub enum BotEvent {
    /// A guild channel changed.
    ChannelUpdate {
        /// Owning guild.
        guild_id: GuildId,
        /// State before the change.
        before: ChannelSnapshot,
        /// State after the change.
        after: ChannelSnapshot,
    },
    /// A guild channel was created.
    ChannelCreate {
        /// Owning guild.
        guild_id: GuildId,
        /// New channel.
        channel_id: ChannelId,
    },
    /// A guild channel was deleted.
    ChannelDelete {
        /// Owning guild.
        guild_id: GuildId,
        /// Removed channel.
        channel_id: ChannelId,
    },
    /// A role was created.
    RoleCreate {
        /// Owning guild.
        guild_id: GuildId,
        /// New role.
        role_id: RoleId,
    },
    /// A role was deleted.
    RoleDelete {
        /// Owning guild.
        guild_id: GuildId,
        /// Removed role.
        role_id: RoleId,
    },
    /// A role changed.
    RoleUpdate {
        /// Owning guild.
        guild_id: GuildId,
        /// Changed role.
        role_id: RoleId,
    },
    /// Guild settings changed.
    GuildUpdate {
        /// The guild.
        guild_id: GuildId,
    },
    /// A member's voice state changed.
    VoiceStateUpdate {
        /// Owning guild.
        guild_id: GuildId,
        /// The member.
        member: MemberRef,
        /// State before the change.
        before: VoiceSnapshot,
        /// State after the change.
        after: VoiceSnapshot,
    },
}

impl BotEvent {
    /// Kind used for routing.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::ChannelUpdate { .. } => EventKind::ChannelUpdate,
            Self::ChannelCreate { .. } => EventKind::ChannelCreate,
            Self::ChannelDelete { .. } => EventKind::ChannelDelete,
            Self::RoleCreate { .. } => EventKind::RoleCreate,
            Self::RoleDelete { .. } => EventKind::RoleDelete,
            Self::RoleUpdate { .. } => EventKind::RoleUpdate,
            Self::GuildUpdate { .. } => EventKind::GuildUpdate,
            Self::VoiceStateUpdate { .. } => EventKind::VoiceStateUpdate,
        }
    }

    /// Guild the event happened in.
    pub const fn guild_id(&self) -> GuildId {
        match self {
            Self::ChannelUpdate { guild_id, .. }
            | Self::ChannelCreate { guild_id, .. }
            | Self::ChannelDelete { guild_id, .. }
            | Self::RoleCreate { guild_id, .. }
            | Self::RoleDelete { guild_id, .. }
            | Self::RoleUpdate { guild_id, .. }
            | Self::GuildUpdate { guild_id }
            | Self::VoiceStateUpdate { guild_id, .. } => *guild_id,
        }
    }

    /// Converts a gateway event, reading names from `cache`.
    ///
    /// Returns `None` for events nobody routes and for updates whose previous
    /// state was not cached.
    pub fn from_full_event(cache: &Cache, event: &FullEvent) -> Option<Self> {
        match event {
            FullEvent::ChannelUpdate { old, new } => {
                let Some(old) = old else {
                    trace!(channel = %new.id, "Channel update without cached previous state");
                    return None;
                };
                Some(Self::ChannelUpdate {
                    guild_id: new.guild_id,
                    before: channel_snapshot(cache, old),
                    after: channel_snapshot(cache, new),
                })
            }
            FullEvent::ChannelCreate { channel } => Some(Self::ChannelCreate {
                guild_id: channel.guild_id,
                channel_id: channel.id,
            }),
            FullEvent::ChannelDelete { channel, .. } => Some(Self::ChannelDelete {
                guild_id: channel.guild_id,
                channel_id: channel.id,
            }),
            FullEvent::GuildRoleCreate { new } => Some(Self::RoleCreate {
                guild_id: new.guild_id,
                role_id: new.id,
            }),
            FullEvent::GuildRoleDelete {
                guild_id,
                removed_role_id,
                ..
            } => Some(Self::RoleDelete {
                guild_id: *guild_id,
                role_id: *removed_role_id,
            }),
            FullEvent::GuildRoleUpdate { new, .. } => Some(Self::RoleUpdate {
                guild_id: new.guild_id,
                role_id: new.id,
            }),
            FullEvent::GuildUpdate { new_data, .. } => Some(Self::GuildUpdate {
                guild_id: new_data.id,
            }),
            FullEvent::VoiceStateUpdate { old, new } => voice_state_event(cache, old.as_ref(), new),
            _ => None,
        }
    }
}

fn channel_snapshot(cache: &Cache, channel: &GuildChannel) -> ChannelSnapshot {
    let category = channel.parent_id.map(|parent| {
        let guild = cache.guild(channel.guild_id);
        category_name(guild.as_ref().map(|guild| &guild.channels), parent)
    });
    ChannelSnapshot::from_guild_channel(channel, category)
}

/// Name of the parent category, or its mention when it is not cached.
fn category_name(channels: Option<&HashMap<ChannelId, GuildChannel>>, parent: ChannelId) -> String {
    channels
        .and_then(|channels| channels.get(&parent))
        .map_or_else(|| format!("<#{parent}>"), |category| category.name.clone())
}

fn voice_state_event(cache: &Cache, old: Option<&VoiceState>, new: &VoiceState) -> Option<BotEvent> {
    let guild_id = new.guild_id?;
    let afk_channel = cache
        .guild(guild_id)
        .and_then(|guild| guild.afk_metadata.as_ref().map(|afk| afk.afk_channel_id));

    let member = new.member.as_ref().map_or_else(
        || MemberRef {
            user_id: new.user_id,
            avatar_url: None,
        },
        |member| MemberRef {
            user_id: member.user.id,
            avatar_url: Some(member.user.face()),
        },
    );

    Some(BotEvent::VoiceStateUpdate {
        guild_id,
        member,
        before: old.map(|state| voice_snapshot(state, afk_channel)).unwrap_or_default(),
        after: voice_snapshot(new, afk_channel),
    })
}

fn voice_snapshot(state: &VoiceState, afk_channel: Option<ChannelId>) -> VoiceSnapshot {
    VoiceSnapshot::observe(state.channel_id, afk_channel, state.deaf, state.mute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ChannelKind;
    use serenity::all::ChannelType;

    fn cached_channel(id: u64, kind: ChannelType, name: &str) -> GuildChannel {
        let mut channel = GuildChannel::default();
        channel.id = ChannelId::new(id);
        channel.guild_id = GuildId::new(1);
        channel.kind = kind;
        channel.name = name.to_string();
        channel
    }

    #[test]
    fn test_category_name_from_guild_channels() {
        let mut channels = HashMap::new();
        channels.insert(
            ChannelId::new(20),
            cached_channel(20, ChannelType::Category, "Staff"),
        );

        assert_eq!(category_name(Some(&channels), ChannelId::new(20)), "Staff");
        assert_eq!(category_name(Some(&channels), ChannelId::new(21)), "<#21>");
        assert_eq!(category_name(None, ChannelId::new(20)), "<#20>");
    }

    #[test]
    fn test_uncached_guild_falls_back_to_mention() {
        let cache = Cache::new();
        let mut channel = cached_channel(5, ChannelType::Text, "general");
        channel.parent_id = Some(ChannelId::new(20));

        let snapshot = channel_snapshot(&cache, &channel);
        assert_eq!(snapshot.category.as_deref(), Some("<#20>"));
        assert_eq!(snapshot.kind, ChannelKind::Text);
    }

    #[test]
    fn test_channel_without_parent_has_no_category() {
        let cache = Cache::new();
        let snapshot = channel_snapshot(&cache, &cached_channel(5, ChannelType::Voice, "lounge"));
        assert_eq!(snapshot.category, None);
    }

    #[test]
    fn test_channel_update_without_previous_state_is_skipped() {
        let cache = Cache::new();
        let event = FullEvent::ChannelUpdate {
            old: None,
            new: cached_channel(5, ChannelType::Text, "general"),
        };
        assert!(BotEvent::from_full_event(&cache, &event).is_none());
    }

    #[test]
    fn test_channel_update_with_previous_state() {
        let cache = Cache::new();
        let mut renamed = cached_channel(5, ChannelType::Text, "rules");
        renamed.topic = Some("Read me".to_string());
        let event = FullEvent::ChannelUpdate {
            old: Some(cached_channel(5, ChannelType::Text, "general")),
            new: renamed,
        };

        let Some(BotEvent::ChannelUpdate {
            guild_id,
            before,
            after,
        }) = BotEvent::from_full_event(&cache, &event)
        else {
            panic!("expected a channel update");
        };
        assert_eq!(guild_id, GuildId::new(1));
        assert_eq!(before.name, "general");
        assert_eq!(after.name, "rules");
        assert_eq!(after.topic.as_deref(), Some("Read me"));
    }

    #[test]
    fn test_unrouted_events_are_dropped() {
        let cache = Cache::new();
        let event = FullEvent::CacheReady { guilds: Vec::new() };
        assert!(BotEvent::from_full_event(&cache, &event).is_none());
    }

    #[test]
    fn test_kind_and_guild() {
        let event = BotEvent::RoleDelete {
            guild_id: GuildId::new(1),
            role_id: RoleId::new(2),
        };
        assert_eq!(event.kind(), EventKind::RoleDelete);
        assert_eq!(event.guild_id(), GuildId::new(1));

        let event = BotEvent::VoiceStateUpdate {
            guild_id: GuildId::new(3),
            member: MemberRef {
                user_id: serenity::all::UserId::new(4),
                avatar_url: None,
            },
            before: VoiceSnapshot::default(),
            after: VoiceSnapshot::default(),
        };
        assert_eq!(event.kind(), EventKind::VoiceStateUpdate);
        assert_eq!(event.guild_id(), GuildId::new(3));
    }
}
