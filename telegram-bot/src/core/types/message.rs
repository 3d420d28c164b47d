//! Inbound message type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A single inbound text message with user, chat and reply context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Message text; empty for non-text updates.
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub reply_to_message_id: Option<String>,
    /// Whether the replied-to message was sent by a bot; only meaningful when `reply_to_message_id` is set.
    pub reply_to_message_from_bot: bool,
    /// Username of the replied-to message's author, when known.
    pub reply_to_username: Option<String>,
}

impl Message {
    /// Incoming text message with no reply context. Used by tests and non-Telegram callers.
    pub fn text(id: impl Into<String>, user: User, chat: Chat, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user,
            chat,
            content: content.into(),
            created_at: Utc::now(),
            reply_to_message_id: None,
            reply_to_message_from_bot: false,
            reply_to_username: None,
        }
    }

    /// Marks this message as a reply to a message by `username` (a bot when `from_bot`).
    pub fn replying_to(mut self, message_id: impl Into<String>, username: Option<&str>, from_bot: bool) -> Self {
        self.reply_to_message_id = Some(message_id.into());
        self.reply_to_username = username.map(str::to_string);
        self.reply_to_message_from_bot = from_bot;
        self
    }
}
