#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;

pub mod acquire;
pub mod error;
pub mod fuzzy;
pub mod record;
pub mod search;
pub mod watch;

pub use acquire::{fetch_tournaments, parse_tournaments, parse_tournaments_at};
pub use error::{Error, FetchError, Result};
pub use record::TournamentRecord;
pub use search::{SearchConfig, SearchEngine, SearchQuery, search_any_field};
pub use watch::{CycleOutcome, FeedSchema, NewsItem, WatchConfig, WatchState, Watcher};

/// Retrieves raw document text for a URL.
///
/// Implementations must not retry or cache; a failure is reported once and
/// the caller decides what it means for its path.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError>;
}

/// Delivers a news notification to wherever the host routes it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, item: &NewsItem) -> anyhow::Result<()>;
}
