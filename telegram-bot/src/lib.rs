//! # Telegram bot framework
//!
//! Transport-agnostic core (Handler, Bot, Message), the [`HandlerChain`], Telegram adapters and
//! the REPL runner, reply chunking, mention/trigger helpers and tracing setup. Applications
//! (e.g. `assistant-bot`) build a chain of their own handlers and hand it to [`run_repl`].

pub mod chain;
pub mod core;
pub mod mention;
pub mod split;
pub mod telegram;

pub use core::{
    init_tracing, Bot, BotError, Chat, ChatKind, Handler, HandlerError, HandlerResponse, Message,
    Result, ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use telegram::{
    dispatch, run_repl, TelegramBotAdapter, TelegramConfig, TelegramMessageWrapper,
    TelegramUserWrapper, APOLOGY_TEXT, DEFAULT_LOG_FILE,
};

pub use mention::{extract_question, is_addressed_to_bot, is_bot_mentioned};
pub use split::{send_chunked, split_message, MAX_MESSAGE_CHARS};
