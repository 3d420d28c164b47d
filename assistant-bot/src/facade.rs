//! **Public API of this crate:** [`run_assistant`] starts the bot; [`build_handler_chain`] builds
//! the same chain without the REPL, for driving with fake messages in tests.

use anyhow::{Context, Result};
use std::sync::Arc;
use telegram_bot::{init_tracing, run_repl, Bot as CoreBot, HandlerChain, TelegramBotAdapter};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::assembly::{self, AssistantServices};
use crate::config::AssistantConfig;
use crate::handlers::Command;

/// Builds the handler chain around `services` and `bot` without starting the REPL.
pub fn build_handler_chain(
    config: &AssistantConfig,
    services: AssistantServices,
    bot: Arc<dyn CoreBot>,
    bot_username: Arc<RwLock<Option<String>>>,
) -> Result<HandlerChain> {
    assembly::build_handler_chain(config, services, bot, bot_username)
}

/// Runs the assistant until the process is stopped. Load config with [`AssistantConfig::load`] first.
///
/// A failed command registration is logged and startup continues; everything else that fails
/// before polling starts is returned.
#[instrument(skip(config))]
pub async fn run_assistant(config: AssistantConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.telegram.log_file).context("failed to initialize logging")?;

    info!(
        log_file = %config.telegram.log_file,
        model = %config.gigachat.model,
        trigger_gating = config.trigger_gating,
        "🚀 Family assistant bot starting"
    );

    let bot = config.telegram.build_bot()?;

    match bot.set_my_commands(Command::bot_commands()).await {
        Ok(_) => info!("Bot commands registered"),
        Err(e) => error!(error = %e, "Failed to register bot commands"),
    }

    let services = AssistantServices::from_config(&config)?;
    let core_bot: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let bot_username = Arc::new(RwLock::new(None));
    let chain = build_handler_chain(&config, services, core_bot.clone(), bot_username.clone())?;

    info!(handlers = chain.len(), "Handler chain ready, starting polling");
    run_repl(bot, chain, core_bot, bot_username).await
}
