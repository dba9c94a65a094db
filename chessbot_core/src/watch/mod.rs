//! News watcher.
//!
//! Each cycle fetches the news page, picks out the featured article and
//! notifies once when its canonical URL differs from the last one notified.
//! The watcher owns its [`WatchState`] and cycles take `&mut self`, so two
//! cycles can never interleave.

mod feed;
mod state;

pub use feed::{FeedSchema, NewsItem, canonical_url, extract_featured};
pub use state::WatchState;

use crate::{Fetcher, Notifier, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "WatchConfig::default_enabled")]
    pub enabled: bool,

    /// Minutes between cycles.
    #[serde(default = "WatchConfig::default_interval_minutes")]
    pub interval_minutes: u64,

    #[serde(default)]
    pub feed: FeedSchema,
}

impl WatchConfig {
    const fn default_enabled() -> bool {
        true
    }

    const fn default_interval_minutes() -> u64 {
        60
    }

    /// Cycle period, never shorter than one minute.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        let minutes = if self.interval_minutes == 0 {
            1
        } else {
            self.interval_minutes
        };
        Duration::from_secs(minutes * 60)
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            interval_minutes: Self::default_interval_minutes(),
            feed: FeedSchema::default(),
        }
    }
}

/// What a single cycle did. Only `Notified` changes the watch state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    FetchFailed,
    NoFeatured,
    Malformed,
    Unchanged,
    DeliveryFailed,
    Notified(NewsItem),
}

pub struct Watcher<F> {
    fetcher: F,
    url: String,
    site_root: String,
    feed: FeedSchema,
    state: WatchState,
}

impl<F: Fetcher> Watcher<F> {
    pub fn new(
        fetcher: F,
        url: impl Into<String>,
        site_root: impl Into<String>,
        feed: FeedSchema,
    ) -> Self {
        Self {
            fetcher,
            url: url.into(),
            site_root: site_root.into(),
            feed,
            state: WatchState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &WatchState {
        &self.state
    }

    /// Fetch the page and extract the featured item without touching state.
    pub async fn featured(&self) -> Result<Option<NewsItem>> {
        let html = self.fetcher.fetch(&self.url).await?;
        extract_featured(&html, &self.feed, &self.site_root)
    }

    pub async fn run_cycle<N>(&mut self, notifier: &N) -> CycleOutcome
    where
        N: Notifier + ?Sized,
    {
        let html = match self.fetcher.fetch(&self.url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("News fetch failed, skipping this cycle: {e}");
                return CycleOutcome::FetchFailed;
            }
        };

        let item = match extract_featured(&html, &self.feed, &self.site_root) {
            Ok(Some(item)) => item,
            Ok(None) => {
                debug!("No featured item on {}", self.url);
                return CycleOutcome::NoFeatured;
            }
            Err(e) => {
                warn!("Could not read featured item: {e}");
                return CycleOutcome::Malformed;
            }
        };

        if !self.state.is_new(&item.url) {
            debug!(url = %item.url, "Featured item unchanged");
            return CycleOutcome::Unchanged;
        }

        if let Err(e) = notifier.notify(&item).await {
            warn!(url = %item.url, "Failed to deliver news notification: {e}");
            return CycleOutcome::DeliveryFailed;
        }

        info!(url = %item.url, title = %item.title, "Notified new featured item");
        self.state.remember(item.url.clone());
        CycleOutcome::Notified(item)
    }

    /// Wait for `ready`, then run a cycle every `period` until the task is
    /// dropped. The first cycle runs immediately after `ready` resolves.
    pub async fn run<N, R>(mut self, notifier: N, period: Duration, ready: R)
    where
        N: Notifier,
        R: Future<Output = ()>,
    {
        ready.await;
        info!(
            "Watching {} every {} minutes",
            self.url,
            period.as_secs() / 60
        );

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let outcome = self.run_cycle(&notifier).await;
            debug!(?outcome, "Watch cycle finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FetchError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::oneshot;

    /// Serves queued responses in order.
    struct ScriptedFetcher(Mutex<VecDeque<std::result::Result<String, FetchError>>>);

    impl ScriptedFetcher {
        fn new(pages: Vec<std::result::Result<String, FetchError>>) -> Self {
            Self(Mutex::new(pages.into()))
        }
    }

    #[async_trait]
    impl Fetcher for ScriptedFetcher {
        async fn fetch(&self, _url: &str) -> std::result::Result<String, FetchError> {
            let Ok(mut pages) = self.0.lock() else {
                panic!("poisoned");
            };
            pages
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Request("script exhausted".to_string())))
        }
    }

    /// Serves the same page forever and counts requests.
    struct CountingFetcher(Arc<AtomicUsize>);

    #[async_trait]
    impl Fetcher for CountingFetcher {
        async fn fetch(&self, _url: &str) -> std::result::Result<String, FetchError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            page("/news/a")
        }
    }

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<NewsItem>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for Recorder {
        async fn notify(&self, item: &NewsItem) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("chat unavailable");
            }
            let Ok(mut sent) = self.sent.lock() else {
                panic!("poisoned");
            };
            sent.push(item.clone());
            Ok(())
        }
    }

    impl Recorder {
        fn count(&self) -> usize {
            self.sent.lock().map(|s| s.len()).unwrap_or_default()
        }
    }

    fn page(href: &str) -> std::result::Result<String, FetchError> {
        Ok(format!(
            r#"<div class="featured"><h2>Title {href}</h2><a href="{href}">more</a></div>"#
        ))
    }

    fn watcher(pages: Vec<std::result::Result<String, FetchError>>) -> Watcher<ScriptedFetcher> {
        Watcher::new(
            ScriptedFetcher::new(pages),
            "https://aicf.in/news/",
            "https://aicf.in",
            FeedSchema::default(),
        )
    }

    #[tokio::test]
    async fn notifies_once_per_change() {
        let mut watcher = watcher(vec![page("/news/a"), page("/news/a"), page("/news/b")]);
        let recorder = Recorder::default();

        assert!(matches!(
            watcher.run_cycle(&recorder).await,
            CycleOutcome::Notified(ref item) if item.url == "https://aicf.in/news/a"
        ));
        assert_eq!(watcher.run_cycle(&recorder).await, CycleOutcome::Unchanged);
        assert!(matches!(
            watcher.run_cycle(&recorder).await,
            CycleOutcome::Notified(_)
        ));

        assert_eq!(recorder.count(), 2);
        assert_eq!(watcher.state().last_url(), Some("https://aicf.in/news/b"));
    }

    #[tokio::test]
    async fn fetch_failure_leaves_state_alone() {
        let mut watcher = watcher(vec![
            page("/news/a"),
            Err(FetchError::Status {
                url: "https://aicf.in/news/".to_string(),
                status: 503,
            }),
        ]);
        let recorder = Recorder::default();
        watcher.run_cycle(&recorder).await;

        assert_eq!(watcher.run_cycle(&recorder).await, CycleOutcome::FetchFailed);
        assert_eq!(recorder.count(), 1);
        assert_eq!(watcher.state().last_url(), Some("https://aicf.in/news/a"));
    }

    #[tokio::test]
    async fn missing_featured_item_is_quiet() {
        let mut watcher = watcher(vec![Ok("<p>nothing</p>".to_string())]);
        let recorder = Recorder::default();
        assert_eq!(watcher.run_cycle(&recorder).await, CycleOutcome::NoFeatured);
        assert_eq!(watcher.state(), &WatchState::default());
    }

    #[tokio::test]
    async fn failed_delivery_is_retried_next_cycle() {
        let mut watcher = watcher(vec![page("/news/a"), page("/news/a")]);
        let failing = Recorder {
            fail: true,
            ..Recorder::default()
        };
        assert_eq!(watcher.run_cycle(&failing).await, CycleOutcome::DeliveryFailed);
        assert_eq!(watcher.state().last_url(), None);

        let recorder = Recorder::default();
        assert!(matches!(
            watcher.run_cycle(&recorder).await,
            CycleOutcome::Notified(_)
        ));
    }

    #[tokio::test]
    async fn reappearing_item_notifies_again() {
        let mut watcher = watcher(vec![page("/news/a"), page("/news/b"), page("/news/a")]);
        let recorder = Recorder::default();
        for _ in 0..3 {
            watcher.run_cycle(&recorder).await;
        }
        assert_eq!(recorder.count(), 3);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = WatchConfig {
            interval_minutes: 0,
            ..WatchConfig::default()
        };
        assert_eq!(config.interval(), Duration::from_secs(60));
        assert_eq!(WatchConfig::default().interval(), Duration::from_secs(3600));
    }

    async fn settle() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn run_waits_for_ready_then_cycles_once_per_period() {
        let calls = Arc::new(AtomicUsize::new(0));
        let watcher = Watcher::new(
            CountingFetcher(Arc::clone(&calls)),
            "https://aicf.in/news/",
            "https://aicf.in",
            FeedSchema::default(),
        );
        let period = Duration::from_secs(60);
        let (ready_tx, ready_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(watcher.run(Recorder::default(), period, async {
            ready_rx.await.ok();
        }));

        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0, "cycle ran before ready");

        assert!(ready_tx.send(()).is_ok());
        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "first cycle not immediate");

        tokio::time::advance(period - Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "cycle ran early");

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        task.abort();
    }
}
