//! Free-form conversation with GigaChat, backed by the per-user history.

use async_trait::async_trait;
use conversation::ConversationStore;
use gigachat_client::LlmClient;
use prompt::MessageRole;
use std::sync::Arc;
use telegram_bot::{
    extract_question, send_chunked, Bot as CoreBot, Handler, HandlerResponse, Message, Result,
};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

pub const EMPTY_INPUT_TEXT: &str = "⚠️ Напишите сообщение";
pub const TOO_LONG_TEXT: &str = "⚠️ Сообщение слишком длинное";

/// Terminal handler: every message that reaches it gets a model reply.
///
/// The question is appended to history before the call; the reply is appended only when the
/// call succeeds, so a failed completion leaves the user entry in place.
pub struct ChatHandler {
    bot: Arc<dyn CoreBot>,
    llm: Arc<dyn LlmClient>,
    store: ConversationStore,
    system_prompt: String,
    max_input_chars: usize,
    trigger_words: Vec<String>,
    bot_username: Arc<RwLock<Option<String>>>,
}

impl ChatHandler {
    pub fn new(
        bot: Arc<dyn CoreBot>,
        llm: Arc<dyn LlmClient>,
        store: ConversationStore,
        system_prompt: String,
        max_input_chars: usize,
        trigger_words: Vec<String>,
        bot_username: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            bot,
            llm,
            store,
            system_prompt,
            max_input_chars,
            trigger_words,
            bot_username,
        }
    }

    async fn converse(&self, message: &Message, question: String) -> String {
        let user_id = message.user.id;

        if let Err(e) = self.bot.send_typing(&message.chat).await {
            warn!(error = %e, "Failed to send typing indicator");
        }

        self.store.append(user_id, MessageRole::User, question).await;
        let history = self.store.read(user_id).await;
        info!(history_len = history.len(), "step: calling model");

        match self.llm.complete(&history, Some(&self.system_prompt)).await {
            Ok(answer) => {
                self.store
                    .append(user_id, MessageRole::Assistant, answer.clone())
                    .await;
                info!(response_len = answer.len(), "step: model replied");
                answer
            }
            Err(e) => {
                warn!(error = %e, "step: completion failed");
                e.user_message()
            }
        }
    }
}

#[async_trait]
impl Handler for ChatHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let username = self.bot_username.read().await.clone();
        let question = extract_question(&message.content, username.as_deref(), &self.trigger_words);

        let reply = if question.is_empty() {
            EMPTY_INPUT_TEXT.to_string()
        } else if question.chars().count() > self.max_input_chars {
            info!(chars = question.chars().count(), "step: input rejected as too long");
            TOO_LONG_TEXT.to_string()
        } else {
            self.converse(message, question).await
        };

        send_chunked(self.bot.as_ref(), message, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
