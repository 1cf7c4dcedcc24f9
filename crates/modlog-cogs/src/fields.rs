//! Static descriptions of the channel attributes that are compared on update.

use crate::snapshot::{ChannelKind, ChannelSnapshot};
use modlog_common::stringify_duration;
use std::fmt;

/// Attribute of a [`ChannelSnapshot`] that can be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// Channel name.
    Name,
    /// Channel topic.
    Topic,
    /// Age restriction flag.
    Nsfw,
    /// Slowmode delay in seconds.
    SlowmodeDelay,
    /// Voice bitrate in bits per second.
    Bitrate,
    /// Voice user limit.
    UserLimit,
    /// Parent category.
    Category,
}

/// A compared attribute value, before or after transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Not set.
    Absent,
    /// Free text.
    Text(String),
    /// Boolean flag.
    Flag(bool),
    /// Raw number.
    Number(u64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("None"),
            Self::Text(text) => f.write_str(text),
            Self::Flag(true) => f.write_str("Yes"),
            Self::Flag(false) => f.write_str("No"),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

/// Value transformation applied to both sides before comparing.
pub type Transform = fn(FieldValue) -> FieldValue;

/// One tracked attribute: what to read, how to label it and how to render it.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Attribute to read.
    pub key: FieldKey,
    /// Label shown in the embed.
    pub label: &'static str,
    /// Optional value transformation.
    pub transform: Option<Transform>,
}

impl FieldSpec {
    /// Field rendered as read.
    pub const fn plain(key: FieldKey, label: &'static str) -> Self {
        Self {
            key,
            label,
            transform: None,
        }
    }

    /// Field rendered through `transform`.
    pub const fn transformed(key: FieldKey, label: &'static str, transform: Transform) -> Self {
        Self {
            key,
            label,
            transform: Some(transform),
        }
    }

    /// Reads and transforms the attribute from `snapshot`.
    pub fn value(&self, snapshot: &ChannelSnapshot) -> FieldValue {
        let raw = read_field(snapshot, self.key);
        match self.transform {
            Some(transform) => transform(raw),
            None => raw,
        }
    }

    /// `**Label:** before` and `**Label:** after` lines if the field changed.
    pub fn diff(&self, before: &ChannelSnapshot, after: &ChannelSnapshot) -> Option<(String, String)> {
        let old = self.value(before);
        let new = self.value(after);
        (old != new).then(|| {
            (
                format!("**{}:** {old}", self.label),
                format!("**{}:** {new}", self.label),
            )
        })
    }
}

fn read_field(snapshot: &ChannelSnapshot, key: FieldKey) -> FieldValue {
    match key {
        FieldKey::Name => FieldValue::Text(snapshot.name.clone()),
        FieldKey::Topic => snapshot
            .topic
            .as_ref()
            .filter(|topic| !topic.is_empty())
            .map_or(FieldValue::Absent, |topic| FieldValue::Text(topic.clone())),
        FieldKey::Nsfw => FieldValue::Flag(snapshot.nsfw),
        FieldKey::SlowmodeDelay => FieldValue::Number(snapshot.slowmode_delay),
        FieldKey::Bitrate => snapshot
            .bitrate
            .map_or(FieldValue::Absent, |bps| FieldValue::Number(u64::from(bps))),
        FieldKey::UserLimit => snapshot
            .user_limit
            .map_or(FieldValue::Absent, |limit| FieldValue::Number(u64::from(limit))),
        FieldKey::Category => snapshot
            .category
            .as_ref()
            .map_or(FieldValue::Absent, |category| FieldValue::Text(category.clone())),
    }
}

/// Slowmode of zero is shown as no slowmode at all.
pub fn readable_slowmode(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Number(0) => FieldValue::Absent,
        FieldValue::Number(seconds) => FieldValue::Text(stringify_duration(seconds)),
        other => other,
    }
}

/// Bits per second to rounded `Nkbps`.
pub fn readable_bitrate(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Number(bps) => FieldValue::Text(format!("{}kbps", (bps + 500) / 1000)),
        other => other,
    }
}

/// Tracked fields of text channels, in display order.
pub const TEXT_CHANNEL_FIELDS: &[FieldSpec] = &[
    FieldSpec::plain(FieldKey::Name, "Name"),
    FieldSpec::plain(FieldKey::Topic, "Topic"),
    FieldSpec::plain(FieldKey::Nsfw, "NSFW"),
    FieldSpec::transformed(FieldKey::SlowmodeDelay, "Slowmode delay", readable_slowmode),
    FieldSpec::plain(FieldKey::Category, "Category"),
];

/// Tracked fields of voice channels, in display order.
pub const VOICE_CHANNEL_FIELDS: &[FieldSpec] = &[
    FieldSpec::plain(FieldKey::Name, "Name"),
    FieldSpec::transformed(FieldKey::Bitrate, "Bitrate", readable_bitrate),
    FieldSpec::plain(FieldKey::UserLimit, "User limit"),
    FieldSpec::plain(FieldKey::Category, "Category"),
];

/// Tracked fields of category channels, in display order.
pub const CATEGORY_CHANNEL_FIELDS: &[FieldSpec] = &[
    FieldSpec::plain(FieldKey::Name, "Name"),
    FieldSpec::plain(FieldKey::Nsfw, "NSFW"),
];

/// Field list for a channel kind; empty for kinds that are not tracked.
pub const fn fields_for(kind: ChannelKind) -> &'static [FieldSpec] {
    match kind {
        ChannelKind::Text => TEXT_CHANNEL_FIELDS,
        ChannelKind::Voice => VOICE_CHANNEL_FIELDS,
        ChannelKind::Category => CATEGORY_CHANNEL_FIELDS,
        ChannelKind::Other => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::{ChannelId, GuildId};

    fn text_channel() -> ChannelSnapshot {
        ChannelSnapshot::new(ChannelId::new(1), GuildId::new(2), ChannelKind::Text, "general")
    }

    #[test]
    fn test_slowmode_transform() {
        assert_eq!(readable_slowmode(FieldValue::Number(0)), FieldValue::Absent);
        assert_eq!(
            readable_slowmode(FieldValue::Number(90)),
            FieldValue::Text("1m 30s".to_string())
        );
    }

    #[test]
    fn test_bitrate_transform_rounds() {
        assert_eq!(
            readable_bitrate(FieldValue::Number(64_000)),
            FieldValue::Text("64kbps".to_string())
        );
        assert_eq!(
            readable_bitrate(FieldValue::Number(95_600)),
            FieldValue::Text("96kbps".to_string())
        );
    }

    #[test]
    fn test_values_render() {
        assert_eq!(FieldValue::Absent.to_string(), "None");
        assert_eq!(FieldValue::Flag(true).to_string(), "Yes");
        assert_eq!(FieldValue::Number(25).to_string(), "25");
    }

    #[test]
    fn test_empty_topic_reads_as_absent() {
        let spec = FieldSpec::plain(FieldKey::Topic, "Topic");
        assert_eq!(spec.value(&text_channel().with_topic("")), FieldValue::Absent);
        assert!(spec.diff(&text_channel(), &text_channel().with_topic("")).is_none());
    }

    #[test]
    fn test_diff_lines() {
        let spec = FieldSpec::plain(FieldKey::Name, "Name");
        let mut renamed = text_channel();
        renamed.name = "lobby".to_string();

        let (before, after) = spec.diff(&text_channel(), &renamed).unwrap();
        assert_eq!(before, "**Name:** general");
        assert_eq!(after, "**Name:** lobby");
    }

    #[test]
    fn test_untracked_kind_has_no_fields() {
        assert!(fields_for(ChannelKind::Other).is_empty());
        assert_eq!(fields_for(ChannelKind::Category).len(), 2);
    }
}
