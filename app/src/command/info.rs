use chessbot_config::Config;

/// Strategy for displaying configuration information.
///
/// Prints the Telegram settings (token masked), the source URLs and the
/// search and watch policy.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== chessbot Configuration ===\n");

        println!("Telegram:");
        println!("  Token: {}", mask_token(&config.telegram.token));
        match config.telegram.notify_chat_id {
            Some(id) => println!("  Notify Chat: {id}"),
            None => println!("  Notify Chat: (not set - news watcher inactive)"),
        }
        println!("  Attention Marker: {}", config.telegram.attention_marker);
        println!();

        println!("Sources:");
        println!("  Tournaments: {}", config.sources.tournaments_url);
        println!("  News: {}", config.sources.news_url);
        println!("  Site Root: {}", config.sources.site_root);
        println!();

        println!("Search:");
        println!("  Threshold: {}", config.search.threshold);
        println!("  Max Results: {}", config.search.max_results);
        println!();

        println!("Watch:");
        println!("  Enabled: {}", config.watch.enabled);
        println!("  Interval: {} min", config.watch.interval().as_secs() / 60);
        println!("  Featured Selector: {}", config.watch.feed.featured);
        println!();

        println!("Fetch:");
        println!("  Timeout: {}s", config.fetch.timeout);
        println!("  Max Size: {} bytes", config.fetch.max_size);

        Ok(())
    }
}

fn mask_token(token: &str) -> String {
    if token.is_empty() {
        "(not set)".to_string()
    } else if token.len() > 8 && token.is_char_boundary(8) {
        format!("{}...***", &token[..8])
    } else {
        "***".to_string()
    }
}
