//! Bot abstraction for outbound messages.
//!
//! [`Bot`] is transport-agnostic; [`crate::telegram::TelegramBotAdapter`] implements it via teloxide
//! and tests substitute a recording mock.

use crate::core::error::Result;
use crate::core::types::{Chat, Message};
use async_trait::async_trait;

/// Outbound side of a chat transport.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Shows the "typing…" indicator in the chat.
    async fn send_typing(&self, chat: &Chat) -> Result<()>;
}
