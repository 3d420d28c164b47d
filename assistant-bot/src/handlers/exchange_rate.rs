//! USD rate requests: answered straight from the CBR feed, no model call.

use async_trait::async_trait;
use data_feeds::ExchangeRateClient;
use regex::Regex;
use std::sync::Arc;
use telegram_bot::{send_chunked, Bot as CoreBot, Handler, HandlerResponse, Message, Result};
use tracing::{info, instrument};

/// Matches "курс", "доллар…", "usd" as whole words, any case.
pub const EXCHANGE_RATE_PATTERN: &str = r"(?i)\b(курс|доллар\w*|usd)\b";

pub struct ExchangeRateHandler {
    bot: Arc<dyn CoreBot>,
    client: ExchangeRateClient,
    pattern: Regex,
}

impl ExchangeRateHandler {
    pub fn new(bot: Arc<dyn CoreBot>, client: ExchangeRateClient) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            bot,
            client,
            pattern: Regex::new(EXCHANGE_RATE_PATTERN)?,
        })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

#[async_trait]
impl Handler for ExchangeRateHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !self.matches(&message.content) {
            return Ok(HandlerResponse::Continue);
        }

        info!("step: exchange rate requested");
        let reply = self.client.fetch_usd_rate_text().await;
        send_chunked(self.bot.as_ref(), message, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
