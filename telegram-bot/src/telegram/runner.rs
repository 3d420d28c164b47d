//! REPL runner: converts teloxide messages to core::Message and runs the HandlerChain on its own
//! task per message. Handler errors and panics are answered with a generic apology.

use crate::chain::HandlerChain;
use crate::core::{Bot as CoreBot, Message, ToCoreMessage};
use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Sent when the chain fails or panics for a message.
pub const APOLOGY_TEXT: &str = "❌ Ошибка. Попробуйте позже.";

/// Inbound text is logged only up to this many chars.
const LOG_PREVIEW_CHARS: usize = 50;

/// Runs the chain for one message on a separate task. If the chain returns an error or the task
/// panics, the chat gets [`APOLOGY_TEXT`]; the caller is never affected.
pub async fn dispatch(chain: HandlerChain, bot: Arc<dyn CoreBot>, message: Message) {
    let task_message = message.clone();
    let outcome = tokio::spawn(async move { chain.handle(&task_message).await }).await;

    let failed = match outcome {
        Ok(Ok(_)) => false,
        Ok(Err(e)) => {
            error!(error = %e, user_id = message.user.id, "Handler chain failed");
            true
        }
        Err(e) => {
            error!(error = %e, user_id = message.user.id, "Handler chain panicked");
            true
        }
    };

    if failed {
        if let Err(e) = bot.send_message(&message.chat, APOLOGY_TEXT).await {
            error!(error = %e, chat_id = message.chat.id, "Failed to send apology");
        }
    }
}

/// Starts long polling with the given teloxide Bot and HandlerChain.
/// Calls get_me() first and writes the username into `bot_username`; every text message is
/// converted to core::Message and dispatched on its own task.
#[instrument(skip(bot, handler_chain, core_bot, bot_username))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    core_bot: Arc<dyn CoreBot>,
    bot_username: Arc<RwLock<Option<String>>>,
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *bot_username.write().await = Some(username.clone());
                info!(username = %username, "Bot username set before repl");
            }
        }
        Err(e) => warn!(error = %e, "get_me failed; mention detection disabled"),
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = handler_chain.clone();
        let core_bot = core_bot.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            match msg.text() {
                Some(text) => {
                    let preview: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
                    info!(
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        from = %core_msg.user.display_name(),
                        message_preview = %preview,
                        "Received message"
                    );
                    tokio::spawn(dispatch(chain, core_bot, core_msg));
                }
                None => {
                    info!(
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        "Received non-text message, ignored"
                    );
                }
            }

            Ok(())
        }
    })
    .await;

    Ok(())
}
