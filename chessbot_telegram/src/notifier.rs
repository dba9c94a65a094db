use crate::reply;
use async_trait::async_trait;
use chessbot_core::{NewsItem, Notifier};
use teloxide::payloads::SendPhotoSetters;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use tracing::warn;
use url::Url;

/// Posts news items to one chat, each preceded by the attention marker.
///
/// Items with an image go out as a photo with the text as its caption.
/// Anything Telegram will not take as a photo falls back to a text message.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
    attention_marker: String,
}

impl TelegramNotifier {
    #[must_use]
    pub const fn new(bot: Bot, chat_id: ChatId, attention_marker: String) -> Self {
        Self {
            bot,
            chat_id,
            attention_marker,
        }
    }

    /// Returns whether the photo was delivered.
    async fn send_photo(&self, item: &NewsItem) -> bool {
        let Some(caption) = reply::news_caption(item) else {
            return false;
        };
        let Some(photo) = item.image_url.as_deref().and_then(|u| Url::parse(u).ok()) else {
            return false;
        };

        match self
            .bot
            .send_photo(self.chat_id, InputFile::url(photo))
            .caption(caption)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(url = %item.url, "News image rejected, sending text instead: {e}");
                false
            }
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, item: &NewsItem) -> anyhow::Result<()> {
        if !self.attention_marker.is_empty() {
            self.bot
                .send_message(self.chat_id, self.attention_marker.clone())
                .await?;
        }
        if !self.send_photo(item).await {
            self.bot.send_message(self.chat_id, reply::news(item)).await?;
        }
        Ok(())
    }
}
