use chessbot_config::Config;
use chessbot_core::SearchEngine;
use chessbot_fetch::HttpFetcher;
use chessbot_telegram::{Error, reply, search_listing};
use chrono::Local;
use tracing::info;

/// Input parameters for the search command.
#[derive(Debug, Clone)]
pub struct SearchInput {
    /// Query words, joined with single spaces
    pub query: Vec<String>,
    /// Print results as JSON instead of text
    pub json: bool,
}

/// Strategy for a one-off tournament search from the terminal.
///
/// Uses the same name/city/date union as the `/search` chat command.
#[derive(Debug, Clone, Copy)]
pub struct SearchStrategy;

impl super::CommandStrategy for SearchStrategy {
    type Input = SearchInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let query = input.query.join(" ");

        let config = Config::load()?;
        let fetcher = HttpFetcher::new(config.fetch.clone())?;
        let engine = SearchEngine::new(config.search);

        let today = Local::now().date_naive();
        let results = match search_listing(
            &fetcher,
            &config.sources.tournaments_url,
            &engine,
            &query,
            today,
        )
        .await
        {
            Ok(results) => results,
            Err(Error::EmptyQuery) => anyhow::bail!(reply::EMPTY_QUERY),
            Err(e) => anyhow::bail!("{} ({e})", reply::failure(&e)),
        };
        info!("{} tournaments matched {:?}", results.len(), query.trim());

        if input.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else if results.is_empty() {
            println!("{}", reply::NO_RESULTS);
        } else {
            for record in results {
                println!("{record}\n");
            }
        }

        Ok(())
    }
}
