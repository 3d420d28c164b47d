//! Mock implementation of [`telegram_bot::Bot`] for integration tests.
//!
//! Records replies and typing indicators so router tests can assert on what each chat saw.

use async_trait::async_trait;
use std::sync::Mutex;
use telegram_bot::{Bot, BotError, Chat, Message, Result};

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text { chat_id: i64, text: String },
    Typing { chat_id: i64 },
}

/// Mock Bot that records sends; optionally fails every send.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Sent>>,
    fail_sends: bool,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_sends: true,
        }
    }

    #[allow(dead_code)]
    pub fn typing_count(&self) -> usize {
        self.sent()
            .iter()
            .filter(|s| matches!(s, Sent::Typing { .. }))
            .count()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts only, in send order.
    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text),
                Sent::Typing { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        if self.fail_sends {
            return Err(BotError::Bot("send failed".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::Text {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Typing { chat_id: chat.id });
        Ok(())
    }
}
