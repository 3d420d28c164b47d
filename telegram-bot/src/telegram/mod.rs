//! Telegram layer: adapters from teloxide types, the Bot implementation, config, REPL runner.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{TelegramConfig, DEFAULT_LOG_FILE};
pub use runner::{dispatch, run_repl, APOLOGY_TEXT};
