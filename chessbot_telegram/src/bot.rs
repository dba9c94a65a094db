use crate::{Command, Error, Result, TelegramNotifier};
use chessbot_config::Config;
use chessbot_core::{SearchEngine, TournamentRecord, Watcher};
use chessbot_fetch::HttpFetcher;
use chrono::Local;
use std::time::Duration;
use teloxide::prelude::*;
use tokio::time::sleep;
use tracing::{info, warn};

/// Telegram front end for tournament search and news alerts
#[derive(Clone)]
pub struct TelegramBot {
    /// Teloxide bot instance
    pub bot: Bot,
    /// Shared HTTP client for both sources
    fetcher: HttpFetcher,
    /// Search policy
    engine: SearchEngine,
    /// Configuration
    pub config: Config,
}

impl TelegramBot {
    /// Create a new Telegram bot
    pub fn new(token: String, config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.fetch.clone())
            .map_err(|e| Error::Config(format!("HTTP client: {e}")))?;
        let engine = SearchEngine::new(config.search);

        Ok(Self {
            bot: Bot::new(token),
            fetcher,
            engine,
            config,
        })
    }

    /// Fetch the current listing and match `query` against name, city and
    /// date.
    pub async fn search(&self, query: &str) -> Result<Vec<TournamentRecord>> {
        crate::search_listing(
            &self.fetcher,
            &self.config.sources.tournaments_url,
            &self.engine,
            query,
            Local::now().date_naive(),
        )
        .await
    }

    /// Test connection to Telegram API with exponential backoff retry.
    /// Starts at 2s, increases by 2s each attempt, max 10s delay.
    /// Retries indefinitely until connection succeeds.
    async fn test_connection(&self) -> Result<()> {
        const INITIAL_DELAY_SECS: u64 = 2;
        const MAX_DELAY_SECS: u64 = 10;

        let mut attempt = 1u64;
        loop {
            match self.bot.get_me().await {
                Ok(bot_user) => {
                    info!(
                        "Connected to Telegram API: @{} (id: {})",
                        bot_user
                            .user
                            .username
                            .unwrap_or_else(|| "no username".to_string()),
                        bot_user.user.id
                    );
                    return Ok(());
                }
                Err(e) => {
                    // 2s, 4s, 6s, 8s, 10s, 10s, ...
                    let delay_secs = (INITIAL_DELAY_SECS * attempt).min(MAX_DELAY_SECS);
                    let delay = Duration::from_secs(delay_secs);

                    warn!("Connection attempt {attempt} failed: {e}. Retrying in {delay_secs}s...");

                    // Only show detailed help on first failure
                    if attempt == 1 {
                        warn!("This may be due to:");
                        warn!("  - Network connectivity issues");
                        warn!("  - Firewall blocking api.telegram.org");
                        warn!("  - Invalid bot token");
                        warn!("  - Telegram API being temporarily unavailable");
                    }

                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Start the news watcher if it is enabled and has a target chat.
    ///
    /// Only called once the Telegram connection is up, so the first cycle
    /// can always deliver.
    fn spawn_watcher(&self) {
        let watch = &self.config.watch;
        if !watch.enabled {
            info!("News watcher disabled in config");
            return;
        }
        let Some(chat_id) = self.config.telegram.notify_chat_id else {
            warn!("News watcher enabled but telegram.notify_chat_id is not set; not watching");
            return;
        };

        let watcher = Watcher::new(
            self.fetcher.clone(),
            self.config.sources.news_url.clone(),
            self.config.sources.site_root.clone(),
            watch.feed.clone(),
        );
        let notifier = TelegramNotifier::new(
            self.bot.clone(),
            ChatId(chat_id),
            self.config.telegram.attention_marker.clone(),
        );

        tokio::spawn(watcher.run(notifier, watch.interval(), std::future::ready(())));
    }

    /// Run the bot
    pub async fn run(self) -> Result<()> {
        use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
        use teloxide::dptree;
        use teloxide::types::Update;

        // Test connection with backoff retry before starting dispatcher
        self.test_connection().await?;

        self.bot.set_my_commands(Command::bot_commands()).await?;
        self.spawn_watcher();

        let bot = self.bot.clone();

        let schema = dptree::entry().branch(Update::filter_message().endpoint({
            let bot_clone = self.clone();
            move |_bot: Bot, msg: teloxide::types::Message| {
                let bot_clone = bot_clone.clone();
                async move { crate::handler::handle_message(bot_clone, msg).await }
            }
        }));

        Dispatcher::builder(bot, schema)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
