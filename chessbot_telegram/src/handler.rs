use crate::{Command, Error, Result, TelegramBot};
use teloxide::{requests::Requester, types::Message};
use tracing::{debug, info, warn};

/// Handle bot commands
pub async fn handle_command(bot: TelegramBot, msg: Message, cmd: Command) -> Result<()> {
    let username = msg
        .from
        .as_ref()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");

    match cmd {
        Command::Start => {
            info!("[@{username}] Command: /start");
            bot.bot
                .send_message(msg.chat.id, Command::welcome_text())
                .await?;
        }
        Command::Help => {
            info!("[@{username}] Command: /help");
            bot.bot
                .send_message(msg.chat.id, Command::help_text())
                .await?;
        }
        Command::Search(query) => {
            info!("[@{username}] Command: /search {query}");

            if !query.trim().is_empty() {
                bot.bot
                    .send_chat_action(msg.chat.id, teloxide::types::ChatAction::Typing)
                    .await?;
            }

            let result = bot.search(&query).await;
            match &result {
                Ok(results) => info!("[@{username}] {} tournaments found", results.len()),
                Err(Error::EmptyQuery) => {}
                Err(e) => warn!("[@{username}] Search failed: {e}"),
            }
            for text in crate::replies(&result) {
                bot.bot.send_message(msg.chat.id, text).await?;
            }
        }
    }

    Ok(())
}

/// Handle any message; only commands get a reply
pub async fn handle_message(bot: TelegramBot, msg: Message) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    match Command::parse_from_text(text) {
        Some(cmd) => handle_command(bot, msg, cmd).await,
        None => {
            debug!("Ignoring non-command message in chat {}", msg.chat.id);
            Ok(())
        }
    }
}
