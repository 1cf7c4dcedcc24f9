//! Main entry point for the modlog bot.

use modlog_bot::{BotResult, ModlogBot};
use modlog_common::init_logging;
use modlog_config::ConfigLoader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> BotResult<()> {
    let config = ConfigLoader::load()?;

    // Dropping the guard flushes the file writer.
    let _guard = init_logging(&config.logging.to_logging_config())?;

    info!("Starting modlog bot v{}", env!("CARGO_PKG_VERSION"));

    let bot = ModlogBot::new(config)?;
    if let Err(e) = bot.run().await {
        error!("Bot failed: {}", e);
        return Err(e);
    }

    info!("Modlog bot has shut down");
    Ok(())
}
