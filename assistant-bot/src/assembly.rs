//! Assembly: builds the outbound clients and the handler chain. Used by the [facade](crate::facade).

use anyhow::{Context, Result};
use conversation::ConversationStore;
use data_feeds::{ExchangeRateClient, WeatherClient};
use gigachat_client::{GigaChatClient, LlmClient};
use std::sync::Arc;
use telegram_bot::{Bot as CoreBot, HandlerChain};
use tokio::sync::RwLock;
use tracing::info;

use crate::config::AssistantConfig;
use crate::handlers::{
    ChatHandler, CommandHandler, ExchangeRateHandler, TriggerGateHandler, WeatherHandler,
};

/// Outbound dependencies of the chain. Built from config in production; tests swap in fakes.
#[derive(Clone)]
pub struct AssistantServices {
    pub llm: Arc<dyn LlmClient>,
    pub store: ConversationStore,
    pub weather: WeatherClient,
    pub exchange: ExchangeRateClient,
}

impl AssistantServices {
    /// GigaChat client, weather and CBR feeds pointed at the configured URLs, and an empty store.
    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        let llm = GigaChatClient::new(config.gigachat.clone())
            .context("failed to build GigaChat HTTP client")?;
        let weather = WeatherClient::new(config.weather_api_key.clone())
            .context("failed to build weather HTTP client")?
            .with_url(config.weather_url.clone());
        let exchange = ExchangeRateClient::new()
            .context("failed to build CBR HTTP client")?
            .with_url(config.cbr_daily_url.clone());

        info!(
            model = %config.gigachat.model,
            history_limit = config.history_limit,
            "Services built"
        );

        Ok(Self {
            llm: Arc::new(llm),
            store: ConversationStore::new(config.history_limit),
            weather,
            exchange,
        })
    }
}

/// Chain order: commands, group gate, exchange rate, weather, chat. The first handler that
/// replies or stops ends the message; chat is terminal.
pub(crate) fn build_handler_chain(
    config: &AssistantConfig,
    services: AssistantServices,
    bot: Arc<dyn CoreBot>,
    bot_username: Arc<RwLock<Option<String>>>,
) -> Result<HandlerChain> {
    let AssistantServices {
        llm,
        store,
        weather,
        exchange,
    } = services;

    let commands = CommandHandler::new(bot.clone(), store.clone(), bot_username.clone());
    let gate = TriggerGateHandler::new(
        config.trigger_gating,
        config.trigger_words.clone(),
        bot_username.clone(),
    );
    let exchange = ExchangeRateHandler::new(bot.clone(), exchange)
        .context("invalid exchange rate pattern")?;
    let weather = WeatherHandler::new(bot.clone(), weather, llm.clone(), config.system_prompt.clone())
        .context("invalid weather pattern")?;
    let chat = ChatHandler::new(
        bot,
        llm,
        store,
        config.system_prompt.clone(),
        config.max_input_chars,
        config.trigger_words.clone(),
        bot_username,
    );

    Ok(HandlerChain::new()
        .add_handler(Arc::new(commands))
        .add_handler(Arc::new(gate))
        .add_handler(Arc::new(exchange))
        .add_handler(Arc::new(weather))
        .add_handler(Arc::new(chat)))
}
