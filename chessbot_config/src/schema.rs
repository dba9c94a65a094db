use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

// Policy structs live next to the code they configure
use chessbot_core::{SearchConfig, WatchConfig};
use chessbot_fetch::FetchConfig;

const CONFIG_DIR: &str = "chessbot";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
    /// Chat that receives news notifications; the watcher is off without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_chat_id: Option<i64>,
    /// Sent on its own right before each notification.
    #[serde(default = "TelegramConfig::default_attention_marker")]
    pub attention_marker: String,
}

impl TelegramConfig {
    fn default_attention_marker() -> String {
        "📣 @channel".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourcesConfig {
    #[serde(default = "SourcesConfig::default_tournaments_url")]
    pub tournaments_url: String,
    #[serde(default = "SourcesConfig::default_news_url")]
    pub news_url: String,
    /// Prefix for site-relative links on the news page.
    #[serde(default = "SourcesConfig::default_site_root")]
    pub site_root: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            tournaments_url: Self::default_tournaments_url(),
            news_url: Self::default_news_url(),
            site_root: Self::default_site_root(),
        }
    }
}

impl SourcesConfig {
    fn default_tournaments_url() -> String {
        "https://aicf.in/all-events/".to_string()
    }

    fn default_news_url() -> String {
        "https://aicf.in/news/".to_string()
    }

    fn default_site_root() -> String {
        "https://aicf.in".to_string()
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'chessbot init' to create config.",
                config_path.display()
            );
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config = Self::from_json(&content)?;
        debug!("Loaded config from {}", config_path.display());

        Ok(config)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your Telegram bot token");
        println!("   2. Set telegram.notify_chat_id to the chat that should get news alerts");
        println!("   3. Run 'chessbot run' to start the bot");
        println!();
        println!("🔧 Configuration options:");
        println!("   - search.threshold: fuzzy match floor for names and cities (0-100)");
        println!("   - search.max_results: results per search field");
        println!("   - watch.interval_minutes: how often the news page is checked");
        println!("   - watch.feed: CSS selectors for the featured news item");
        println!();
        Ok(())
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "telegram": {
    "token": "your-telegram-bot-token-here",
    "notify_chat_id": null,
    "attention_marker": "📣 @channel"
  },
  "sources": {
    "tournaments_url": "https://aicf.in/all-events/",
    "news_url": "https://aicf.in/news/",
    "site_root": "https://aicf.in"
  },
  "search": {
    "threshold": 80,
    "max_results": 5
  },
  "watch": {
    "enabled": true,
    "interval_minutes": 60,
    "feed": {
      "featured": ".featured",
      "link": "a[href]",
      "title": "h1, h2, h3, .title",
      "summary": "p",
      "image": "img[src]"
    }
  },
  "fetch": {
    "timeout": 10,
    "user_agent": "Mozilla/5.0 (compatible; chessbot/1.0)",
    "max_size": 5000000
  }
}"#;
