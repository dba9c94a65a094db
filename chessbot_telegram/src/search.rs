//! The `/search` flow shared by the chat handler and the CLI: validate the
//! query, acquire the listing, run the name/city/date union.

use crate::{Error, Result, reply};
use chessbot_core::{Fetcher, SearchEngine, TournamentRecord, fetch_tournaments, search_any_field};
use chrono::NaiveDate;
use tracing::debug;

/// Search the listing at `url` for `query`.
///
/// A blank query is rejected with [`Error::EmptyQuery`] before anything is
/// fetched.
pub async fn search_listing(
    fetcher: &dyn Fetcher,
    url: &str,
    engine: &SearchEngine,
    query: &str,
    today: NaiveDate,
) -> Result<Vec<TournamentRecord>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::EmptyQuery);
    }

    let records = fetch_tournaments(fetcher, url).await?;
    let results: Vec<TournamentRecord> = search_any_field(engine, &records, query, today)
        .into_iter()
        .cloned()
        .collect();
    debug!(
        "{} of {} tournaments matched {query:?}",
        results.len(),
        records.len()
    );
    Ok(results)
}

/// Chat messages answering a search, one per record found.
#[must_use]
pub fn replies(result: &Result<Vec<TournamentRecord>>) -> Vec<String> {
    match result {
        Ok(records) if records.is_empty() => vec![reply::NO_RESULTS.to_string()],
        Ok(records) => records.iter().map(ToString::to_string).collect(),
        Err(e) => vec![reply::failure(e).to_string()],
    }
}
