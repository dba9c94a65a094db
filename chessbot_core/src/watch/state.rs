/// Identity of the last item a notification went out for.
///
/// Holds exactly one URL, not a history: an item that is superseded and
/// later becomes featured again counts as new.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchState {
    last_url: Option<String>,
}

impl WatchState {
    #[must_use]
    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    #[must_use]
    pub fn is_new(&self, url: &str) -> bool {
        self.last_url.as_deref() != Some(url)
    }

    pub fn remember(&mut self, url: impl Into<String>) {
        self.last_url = Some(url.into());
    }
}
