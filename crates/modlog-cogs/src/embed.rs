//! The embed payload produced by the change formatters.

use modlog_common::truncate_string;
use serenity::all::{Colour, CreateEmbed, Timestamp};

/// Platform limit for embed descriptions.
pub const DESCRIPTION_LIMIT: usize = 4096;

/// Platform limit for embed field values.
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// A titled embed with optional side-by-side before/after columns.
///
/// `before` and `after` always have the same length; line `i` of each
/// describes the same attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffEmbed {
    /// Embed title.
    pub title: String,
    /// Embed description.
    pub description: String,
    /// Side colour.
    pub colour: Colour,
    /// `Label: value` lines describing the old state.
    pub before: Vec<String>,
    /// `Label: value` lines describing the new state.
    pub after: Vec<String>,
    /// Thumbnail image.
    pub thumbnail: Option<String>,
    /// When the embed was formatted.
    pub timestamp: Timestamp,
}

impl DiffEmbed {
    /// Creates an embed without columns, timestamped now.
    pub fn new(title: impl Into<String>, description: impl Into<String>, colour: Colour) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            colour,
            before: Vec::new(),
            after: Vec::new(),
            thumbnail: None,
            timestamp: Timestamp::now(),
        }
    }

    /// Sets the before/after columns.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the columns differ in length.
    #[must_use]
    pub fn with_columns(mut self, before: Vec<String>, after: Vec<String>) -> Self {
        debug_assert_eq!(before.len(), after.len());
        self.before = before;
        self.after = after;
        self
    }

    /// Sets the thumbnail.
    #[must_use]
    pub fn with_thumbnail(mut self, url: Option<String>) -> Self {
        self.thumbnail = url;
        self
    }

    /// Whether the embed carries before/after columns.
    pub fn has_columns(&self) -> bool {
        !self.after.is_empty()
    }

    /// Builds the message embed.
    pub fn to_create_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .title(&self.title)
            .description(truncate_string(&self.description, DESCRIPTION_LIMIT))
            .colour(self.colour)
            .timestamp(self.timestamp);

        if self.has_columns() {
            embed = embed
                .field("Before", truncate_string(&self.before.join("\n"), FIELD_VALUE_LIMIT), true)
                .field("After", truncate_string(&self.after.join("\n"), FIELD_VALUE_LIMIT), true);
        }

        if let Some(url) = &self.thumbnail {
            embed = embed.thumbnail(url);
        }

        embed
    }
}
