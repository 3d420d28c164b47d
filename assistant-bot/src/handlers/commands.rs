//! Slash commands: `/start`, `/help`, `/clear`, `/about` (also `/cmd@botname`).

use async_trait::async_trait;
use conversation::ConversationStore;
use std::sync::Arc;
use telegram_bot::{send_chunked, Bot as CoreBot, Handler, HandlerResponse, Message, Result};
use teloxide::utils::command::{BotCommands, ParseError};
use tokio::sync::RwLock;
use tracing::{info, instrument};

/// Commands registered with Telegram at startup.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "Начало работы")]
    Start,
    #[command(description = "Справка")]
    Help,
    #[command(description = "Новый диалог")]
    Clear,
    #[command(description = "О боте")]
    About,
}

pub const START_TEXT: &str = "👋 Привет! Я семейный AI помощник на GigaChat.\n\n\
🤖 Я помогу с:\n\
• Советами и рекомендациями\n\
• Планированием\n\
• Ответами на вопросы\n\
• Генерацией идей\n\n\
🌤 Спросите про погоду или 💵 курс доллара.\n\n\
📝 Просто напишите сообщение!\n\
/help - справка\n\
/clear - новый диалог\n\
/about - о боте";

pub const HELP_TEXT: &str = "📋 СПРАВКА\n\n\
/start - начало\n\
/help - справка\n\
/clear - очистить историю\n\
/about - о боте\n\n\
💡 Просто пишите сообщения!\n\
🌤 «Какая погода?» - погода в Липецке\n\
💵 «Курс доллара» - курс USD ЦБ РФ";

pub const CLEARED_TEXT: &str = "✅ История очищена! 🚀";

pub const UNKNOWN_COMMAND_TEXT: &str = "🤔 Неизвестная команда. Список команд: /help";

/// `/about` text; reports the configured history capacity.
pub fn about_text(history_limit: usize) -> String {
    format!(
        "ℹ️ О БОТЕ\n\n\
         🤖 Семейный AI помощник\n\
         ⚙️ GigaChat (Сбербанк)\n\
         💾 Память: {} сообщений\n\
         🇷🇺 Русский язык",
        history_limit
    )
}

/// Returns the `@botname` suffix of a command, if any (`/start@family_bot` → `family_bot`).
fn addressed_username(text: &str) -> Option<&str> {
    let command = text.split_whitespace().next()?;
    command.split_once('@').map(|(_, name)| name)
}

/// Answers the fixed commands; clears history on `/clear`. Non-commands pass through.
pub struct CommandHandler {
    bot: Arc<dyn CoreBot>,
    store: ConversationStore,
    bot_username: Arc<RwLock<Option<String>>>,
}

impl CommandHandler {
    pub fn new(
        bot: Arc<dyn CoreBot>,
        store: ConversationStore,
        bot_username: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            bot,
            store,
            bot_username,
        }
    }

    async fn execute(&self, command: &Command, message: &Message) -> String {
        match command {
            Command::Start => {
                info!(user_id = message.user.id, from = %message.user.display_name(), "New user started the bot");
                START_TEXT.to_string()
            }
            Command::Help => HELP_TEXT.to_string(),
            Command::Clear => {
                self.store.clear(message.user.id).await;
                info!(user_id = message.user.id, "step: dialog history cleared");
                CLEARED_TEXT.to_string()
            }
            Command::About => about_text(self.store.limit()),
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = message.content.trim();
        if !text.starts_with('/') {
            return Ok(HandlerResponse::Continue);
        }

        let username = self.bot_username.read().await.clone();
        let target = addressed_username(text);
        let for_us = match (target, username.as_deref()) {
            (Some(target), Some(me)) => target.eq_ignore_ascii_case(me),
            (Some(_), None) => false,
            (None, _) => true,
        };
        if !for_us {
            info!(target = ?target, "step: command for another bot ignored");
            return Ok(HandlerResponse::Stop);
        }

        let reply = match Command::parse(text, username.as_deref().unwrap_or_default()) {
            Ok(command) => {
                info!(command = ?command, "step: command received");
                self.execute(&command, message).await
            }
            Err(ParseError::UnknownCommand(name)) => {
                // In groups an unaddressed unknown command is most likely meant for another bot.
                if message.chat.is_group() && target.is_none() {
                    return Ok(HandlerResponse::Stop);
                }
                info!(command = %name, "step: unknown command");
                UNKNOWN_COMMAND_TEXT.to_string()
            }
            Err(e) => {
                info!(error = %e, "step: malformed command");
                UNKNOWN_COMMAND_TEXT.to_string()
            }
        };

        send_chunked(self.bot.as_ref(), message, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
