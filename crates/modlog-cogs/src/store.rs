//! Persistent mapping from `(guild, category)` to the configured log channel.

use async_trait::async_trait;
use dashmap::DashMap;
use modlog_common::LogCategory;
use serenity::all::{ChannelId, GuildId};
use std::path::Path;
use tracing::{debug, info};

/// Tree holding the log channel entries.
const LOG_CHANNELS_TREE: &str = "log_channels";

/// Log channel storage errors.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The embedded database failed.
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// A stored value could not be decoded.
    #[error("Corrupt log channel entry for {key}")]
    Corrupt {
        /// Key of the unreadable entry.
        key: String,
    },
}

/// Log channel configuration per guild and category.
///
/// A stored id of `0` is treated the same as no entry.
#[async_trait]
pub trait LogChannelStore: Send + Sync {
    /// Configured channel for `category` in `guild`.
    async fn get_log_channel(
        &self,
        category: LogCategory,
        guild: GuildId,
    ) -> Result<Option<ChannelId>, StoreError>;

    /// Configures the channel for `category` in `guild`.
    async fn set_log_channel(
        &self,
        category: LogCategory,
        guild: GuildId,
        channel: ChannelId,
    ) -> Result<(), StoreError>;

    /// Removes the configuration; returns whether there was one.
    async fn clear_log_channel(&self, category: LogCategory, guild: GuildId) -> Result<bool, StoreError>;

    /// Every configured category of `guild`.
    async fn log_channels_for(&self, guild: GuildId) -> Result<Vec<(LogCategory, ChannelId)>, StoreError> {
        let mut configured = Vec::new();
        for category in LogCategory::ALL {
            if let Some(channel) = self.get_log_channel(category, guild).await? {
                configured.push((category, channel));
            }
        }
        Ok(configured)
    }
}

/// Log channel store backed by an embedded sled database.
#[derive(Debug, Clone)]
pub struct SledLogChannelStore {
    tree: sled::Tree,
}

impl SledLogChannelStore {
    /// Opens or creates the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        info!("Opening log channel database at {}", path.as_ref().display());
        let db = sled::Config::default()
            .path(path.as_ref())
            .flush_every_ms(Some(1000))
            .open()?;
        Self::from_db(&db)
    }

    /// Opens a throwaway database that lives in memory only.
    pub fn temporary() -> Result<Self, StoreError> {
        let db = sled::Config::default().temporary(true).open()?;
        Self::from_db(&db)
    }

    fn from_db(db: &sled::Db) -> Result<Self, StoreError> {
        Ok(Self {
            tree: db.open_tree(LOG_CHANNELS_TREE)?,
        })
    }

    fn key(category: LogCategory, guild: GuildId) -> String {
        format!("{guild}:{category}")
    }
}

#[async_trait]
impl LogChannelStore for SledLogChannelStore {
    async fn get_log_channel(
        &self,
        category: LogCategory,
        guild: GuildId,
    ) -> Result<Option<ChannelId>, StoreError> {
        let key = Self::key(category, guild);
        let Some(value) = self.tree.get(key.as_bytes())? else {
            debug!("No {category} channel configured for guild {guild}");
            return Ok(None);
        };

        let bytes: [u8; 8] = value
            .to_vec()
            .try_into()
            .map_err(|_| StoreError::Corrupt { key: key.clone() })?;

        match u64::from_be_bytes(bytes) {
            0 => Ok(None),
            id => Ok(Some(ChannelId::new(id))),
        }
    }

    async fn set_log_channel(
        &self,
        category: LogCategory,
        guild: GuildId,
        channel: ChannelId,
    ) -> Result<(), StoreError> {
        let key = Self::key(category, guild);
        self.tree.insert(key.as_bytes(), channel.get().to_be_bytes().to_vec())?;
        self.tree.flush_async().await?;
        debug!("Set {category} channel of guild {guild} to {channel}");
        Ok(())
    }

    async fn clear_log_channel(&self, category: LogCategory, guild: GuildId) -> Result<bool, StoreError> {
        let existed = self.tree.remove(Self::key(category, guild).as_bytes())?.is_some();
        if existed {
            self.tree.flush_async().await?;
            debug!("Cleared {category} channel of guild {guild}");
        }
        Ok(existed)
    }
}

/// Log channel store that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryLogChannelStore {
    channels: DashMap<(GuildId, LogCategory), ChannelId>,
}

impl MemoryLogChannelStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LogChannelStore for MemoryLogChannelStore {
    async fn get_log_channel(
        &self,
        category: LogCategory,
        guild: GuildId,
    ) -> Result<Option<ChannelId>, StoreError> {
        Ok(self.channels.get(&(guild, category)).map(|entry| *entry))
    }

    async fn set_log_channel(
        &self,
        category: LogCategory,
        guild: GuildId,
        channel: ChannelId,
    ) -> Result<(), StoreError> {
        self.channels.insert((guild, category), channel);
        Ok(())
    }

    async fn clear_log_channel(&self, category: LogCategory, guild: GuildId) -> Result<bool, StoreError> {
        Ok(self.channels.remove(&(guild, category)).is_some())
    }
}
