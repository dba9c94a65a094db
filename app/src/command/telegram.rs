use crate::command::CommandStrategy;
use chessbot_config::Config;
use chessbot_telegram::TelegramBot;
use tracing::info;

/// Input for the bot command.
pub struct TelegramInput {
    /// Optional bot token (overrides config)
    pub token: Option<String>,
}

/// Strategy for running the Telegram bot and, if configured, the news
/// watcher alongside it.
pub struct TelegramStrategy;

impl CommandStrategy for TelegramStrategy {
    type Input = TelegramInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        // Get token from input or config
        let token = if let Some(t) = input.token {
            t
        } else if !config.telegram.token.is_empty() {
            config.telegram.token.clone()
        } else {
            anyhow::bail!("Telegram bot token not configured. Set \"telegram.token\" in config");
        };

        info!("Starting Telegram bot...");

        let bot = TelegramBot::new(token, config)?;

        info!("Telegram bot is running. Press Ctrl+C to stop.");
        bot.run().await?;

        Ok(())
    }
}
