//! # pigeon-telegram
//!
//! Telegram Bot API over HTTPS: a `BotApi` client built on reqwest and a
//! long-polling `Poller` that feeds updates into a channel.
//! Docs: <https://core.telegram.org/bots/api>

mod client;
mod envelope;
mod polling;

pub use client::TelegramClient;
pub use polling::{Poller, PollerSettings};
