//! # assistant_bot
//!
//! Family assistant for Telegram: free-form conversation with GigaChat, a weather narrative for
//! Lipetsk, and the CBR USD rate. **Public API:** see [facade] for [`run_assistant`] and
//! [`build_handler_chain`].

mod assembly;
mod cli;
mod config;
mod facade;
pub mod handlers;

pub use assembly::AssistantServices;
pub use cli::{Cli, Commands};
pub use config::{parse_trigger_words, AssistantConfig, DEFAULT_MAX_INPUT_CHARS, DEFAULT_TRIGGER_WORDS};
pub use facade::*;
pub use handlers::{
    ChatHandler, Command, CommandHandler, ExchangeRateHandler, TriggerGateHandler, WeatherHandler,
};
