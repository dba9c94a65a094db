use teloxide::types::BotCommand;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    /// Everything after `/search`, trimmed. May be empty.
    Search(String),
}

impl Command {
    fn all() -> Vec<BotCommand> {
        vec![
            BotCommand {
                command: "start".to_string(),
                description: "Start using the bot".to_string(),
            },
            BotCommand {
                command: "search".to_string(),
                description: "Search tournaments by name, city or date".to_string(),
            },
            BotCommand {
                command: "help".to_string(),
                description: "Show help".to_string(),
            },
        ]
    }

    #[must_use]
    pub fn bot_commands() -> Vec<BotCommand> {
        Self::all()
    }

    #[must_use]
    pub fn parse_from_text(text: &str) -> Option<Self> {
        let text = text.trim();
        let (head, rest) = text
            .split_once(char::is_whitespace)
            .unwrap_or((text, ""));

        // Remove bot mention if present (e.g., "/search@my_bot")
        let head = head.split('@').next().unwrap_or(head).to_lowercase();

        match head.as_str() {
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            "/search" => Some(Self::Search(rest.trim().to_string())),
            _ => None,
        }
    }

    #[must_use]
    pub const fn help_text() -> &'static str {
        r"
♟ Chess Tournament Bot

Commands:
/search <query> - Search upcoming tournaments by name, city or date
/help           - Show this help message

Examples:
/search delhi open
/search mumbai
/search 03-2025
"
    }

    #[must_use]
    pub const fn welcome_text() -> &'static str {
        r"
👋 Welcome to the Chess Tournament Bot!

I can:
• Find upcoming tournaments by name, city or date
• Post chess federation news as soon as it is featured

Send /help to see the command list.
"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(Command::parse_from_text("/start"), Some(Command::Start));
        assert_eq!(Command::parse_from_text(" /HELP "), Some(Command::Help));
    }

    #[test]
    fn search_keeps_query_text() {
        assert_eq!(
            Command::parse_from_text("/search  Delhi Open "),
            Some(Command::Search("Delhi Open".to_string()))
        );
    }

    #[test]
    fn strips_bot_mention() {
        assert_eq!(
            Command::parse_from_text("/search@chess_bot new delhi"),
            Some(Command::Search("new delhi".to_string()))
        );
    }

    #[test]
    fn bare_search_has_empty_query() {
        assert_eq!(
            Command::parse_from_text("/search"),
            Some(Command::Search(String::new()))
        );
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(Command::parse_from_text("delhi open"), None);
        assert_eq!(Command::parse_from_text("/reset"), None);
    }

    #[test]
    fn bot_commands_cover_search() {
        assert!(Command::bot_commands().iter().any(|c| c.command == "search"));
    }
}
