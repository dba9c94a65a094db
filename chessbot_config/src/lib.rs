mod schema;

pub use schema::{Config, SourcesConfig, TelegramConfig};
