//! User-facing reply texts.
//!
//! Every failure gets its own wording so a broken source never looks like
//! "no matches".

use crate::Error;
use chessbot_core::{Error as CoreError, NewsItem};
use std::fmt::Write;

pub const EMPTY_QUERY: &str = "Please provide a search query.";
pub const NO_RESULTS: &str = "No tournaments found.";
pub const SEARCH_UNAVAILABLE: &str =
    "Tournament search is temporarily unavailable. Please try again later.";
pub const SOURCE_CHANGED: &str =
    "The tournament listing has changed format and cannot be read right now.";

#[must_use]
pub const fn search_failure(error: &CoreError) -> &'static str {
    match error {
        CoreError::Fetch(_) => SEARCH_UNAVAILABLE,
        CoreError::Parse(_) => SOURCE_CHANGED,
    }
}

/// Reply for any failed search, including a blank query.
#[must_use]
pub const fn failure(error: &Error) -> &'static str {
    match error {
        Error::EmptyQuery => EMPTY_QUERY,
        Error::Core(e) => search_failure(e),
        Error::Telegram(_) | Error::Config(_) => SEARCH_UNAVAILABLE,
    }
}

/// Telegram's limit on photo captions, in characters.
pub const CAPTION_LIMIT: usize = 1024;

/// Text-only announcement; the image, if any, goes on its own line.
#[must_use]
pub fn news(item: &NewsItem) -> String {
    let mut text = news_body(item);
    if let Some(image) = &item.image_url {
        let _ = write!(text, "\n🖼 {image}");
    }
    text
}

/// Caption for announcing `item` as a photo, or `None` when the item has no
/// image or the text does not fit in a caption.
#[must_use]
pub fn news_caption(item: &NewsItem) -> Option<String> {
    item.image_url.as_ref()?;
    let caption = news_body(item);
    (caption.chars().count() <= CAPTION_LIMIT).then_some(caption)
}

fn news_body(item: &NewsItem) -> String {
    let mut text = format!("📰 {}\n", item.title);
    if !item.summary.is_empty() {
        let _ = write!(text, "\n{}\n", item.summary);
    }
    let _ = write!(text, "\n🔗 {}", item.url);
    text
}
