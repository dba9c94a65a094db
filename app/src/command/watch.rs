use async_trait::async_trait;
use chessbot_config::Config;
use chessbot_core::{NewsItem, Notifier, Watcher};
use chessbot_fetch::HttpFetcher;
use chessbot_telegram::reply;
use tracing::info;

/// Input parameters for the watch command.
#[derive(Debug, Clone, Copy)]
pub struct WatchInput {
    /// Print the current featured item and exit
    pub once: bool,
}

/// Strategy for watching the news page from the terminal.
///
/// Runs the same watch loop as the bot but prints each new featured item to
/// stdout instead of posting it. Nothing is sent to Telegram.
#[derive(Debug, Clone, Copy)]
pub struct WatchStrategy;

impl super::CommandStrategy for WatchStrategy {
    type Input = WatchInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let fetcher = HttpFetcher::new(config.fetch.clone())?;
        let watcher = Watcher::new(
            fetcher,
            config.sources.news_url.clone(),
            config.sources.site_root.clone(),
            config.watch.feed.clone(),
        );

        if input.once {
            match watcher.featured().await? {
                Some(item) => println!("{}", reply::news(&item)),
                None => println!("No featured item on {}", config.sources.news_url),
            }
            return Ok(());
        }

        tokio::select! {
            () = watcher.run(PrintNotifier, config.watch.interval(), std::future::ready(())) => {}
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("Stopping news watcher");
            }
        }
        Ok(())
    }
}

/// Prints announcements to stdout.
struct PrintNotifier;

#[async_trait]
impl Notifier for PrintNotifier {
    async fn notify(&self, item: &NewsItem) -> anyhow::Result<()> {
        println!("{}\n", reply::news(item));
        Ok(())
    }
}
