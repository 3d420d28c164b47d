//! Group-chat gate: when enabled, drops group messages that are not addressed to the bot.

use async_trait::async_trait;
use std::sync::Arc;
use telegram_bot::{mention, Handler, HandlerResponse, Message, Result};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Stops the chain silently for unaddressed group messages. Private chats and commands pass.
/// Addressed means: starts with a trigger phrase, @mentions the bot, or replies to the bot.
pub struct TriggerGateHandler {
    enabled: bool,
    trigger_words: Vec<String>,
    bot_username: Arc<RwLock<Option<String>>>,
}

impl TriggerGateHandler {
    pub fn new(
        enabled: bool,
        trigger_words: Vec<String>,
        bot_username: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            enabled,
            trigger_words,
            bot_username,
        }
    }
}

#[async_trait]
impl Handler for TriggerGateHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !self.enabled || !message.chat.is_group() || message.content.trim_start().starts_with('/') {
            return Ok(HandlerResponse::Continue);
        }

        let username = self.bot_username.read().await.clone();
        if mention::is_addressed_to_bot(message, username.as_deref(), &self.trigger_words) {
            return Ok(HandlerResponse::Continue);
        }

        debug!(user_id = message.user.id, "step: group message not addressed to bot, dropped");
        Ok(HandlerResponse::Stop)
    }
}
