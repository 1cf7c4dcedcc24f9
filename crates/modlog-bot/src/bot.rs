//! Core bot logic using the Poise framework.

use crate::error::BotResult;
use modlog_cogs::{
    Cog, EventRouter, LogChannelResolver, LogChannelStore, MemoryLogChannelStore, ServerLog,
    SledLogChannelStore, VoiceLog,
};
use modlog_commands::{create_framework, Data, Lifecycle};
use modlog_common::format_timestamp;
use modlog_config::{Config, ConfigCache, DatabaseConfig};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Main bot structure.
///
/// Owns everything that outlives a single gateway session: configuration,
/// the log channel store, the cog router and the lifecycle handle.
pub struct ModlogBot {
    config: Arc<ConfigCache>,
    store: Arc<dyn LogChannelStore>,
    router: Arc<EventRouter>,
    lifecycle: Arc<Lifecycle>,
}

impl ModlogBot {
    /// Creates a bot with the store described by `config.database`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new(config: Config) -> BotResult<Self> {
        let store = open_store(&config.database)?;
        Ok(Self::with_store(config, store))
    }

    /// Creates a bot on top of an existing store.
    pub fn with_store(config: Config, store: Arc<dyn LogChannelStore>) -> Self {
        let resolver = Arc::new(LogChannelResolver::new(Arc::clone(&store)));
        Self {
            config: Arc::new(ConfigCache::new(config)),
            store,
            router: Arc::new(EventRouter::new(default_cogs(&resolver))),
            lifecycle: Arc::new(Lifecycle::new()),
        }
    }

    /// The cog router.
    pub const fn router(&self) -> &Arc<EventRouter> {
        &self.router
    }

    /// The lifecycle handle shared with the commands.
    pub const fn lifecycle(&self) -> &Arc<Lifecycle> {
        &self.lifecycle
    }

    /// Gateway intents the bot needs.
    pub fn intents() -> serenity::GatewayIntents {
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT
    }

    /// Runs the client, starting it again for as long as restarts are requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built or stops with an error.
    pub async fn run(&self) -> BotResult<()> {
        info!(
            "Running since {}",
            format_timestamp(self.lifecycle.start_time())
        );
        loop {
            self.start().await?;
            if !self.lifecycle.take_restart() {
                break;
            }
            info!("Restarting Discord client");
        }
        Ok(())
    }

    /// Starts one client session and waits for it to end.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built or stops with an error.
    pub async fn start(&self) -> BotResult<()> {
        let config = self.config.get();
        let data = Data {
            config: Arc::clone(&self.config),
            router: Arc::clone(&self.router),
            store: Arc::clone(&self.store),
            lifecycle: Arc::clone(&self.lifecycle),
        };

        let framework = create_framework(config.discord.prefix.clone())
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("Logged in as {} in {} guilds", ready.user.name, ready.guilds.len());
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    Ok(data)
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(&config.discord.token, Self::intents())
            .framework(framework)
            .await?;

        let shard_manager = Arc::clone(&client.shard_manager);
        let signal_task = tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {:?}", e);
                return;
            }
            info!("Received shutdown signal, starting graceful shutdown");
            shard_manager.shutdown_all().await;
        });

        let result = client.start().await;
        signal_task.abort();
        if let Err(e) = &result {
            warn!("Client stopped with an error: {}", e);
        }
        result?;
        Ok(())
    }
}

/// The logging cogs, in registration order.
pub fn default_cogs(resolver: &Arc<LogChannelResolver>) -> Vec<Arc<dyn Cog>> {
    vec![
        Arc::new(ServerLog::new(Arc::clone(resolver))),
        Arc::new(VoiceLog::new(Arc::clone(resolver))),
    ]
}

/// Opens the configured log channel store.
///
/// # Errors
///
/// Returns an error if the sled database cannot be opened.
pub fn open_store(database: &DatabaseConfig) -> BotResult<Arc<dyn LogChannelStore>> {
    if database.in_memory {
        info!("Using in-memory log channel store");
        return Ok(Arc::new(MemoryLogChannelStore::new()));
    }

    info!("Opening log channel store at {}", database.path.display());
    Ok(Arc::new(SledLogChannelStore::open(&database.path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> Config {
        let mut config = Config::default();
        config.discord.token = "test-token".to_string();
        config.database.in_memory = true;
        config
    }

    #[test]
    fn test_bot_registers_logging_cogs() {
        let bot = ModlogBot::new(memory_config()).unwrap();
        assert_eq!(bot.router().names(), vec!["server_log", "voice_log"]);
        assert!(bot.router().is_loaded("server_log"));
    }

    #[test]
    fn test_intents_cover_voice_and_prefix_commands() {
        let intents = ModlogBot::intents();
        assert!(intents.contains(serenity::GatewayIntents::GUILDS));
        assert!(intents.contains(serenity::GatewayIntents::GUILD_VOICE_STATES));
        assert!(intents.contains(serenity::GatewayIntents::MESSAGE_CONTENT));
    }

    #[test]
    fn test_restart_flag_starts_clear() {
        let bot = ModlogBot::new(memory_config()).unwrap();
        assert!(!bot.lifecycle().take_restart());
    }
}
