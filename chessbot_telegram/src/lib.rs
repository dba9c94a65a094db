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

mod bot;
mod command;
mod error;
mod handler;
mod notifier;
pub mod reply;
mod search;

pub use bot::TelegramBot;
pub use command::Command;
pub use error::{Error, Result};
pub use notifier::TelegramNotifier;
pub use search::{replies, search_listing};
