//! Weather requests: fetch current conditions, then ask the model for a short narrative.

use async_trait::async_trait;
use data_feeds::WeatherClient;
use gigachat_client::LlmClient;
use prompt::{weather_narrative_prompt, ChatMessage};
use regex::Regex;
use std::sync::Arc;
use telegram_bot::{send_chunked, Bot as CoreBot, Handler, HandlerResponse, Message, Result};
use tracing::{info, instrument, warn};

/// Matches any form of "погода" (погода, погоду, погоды…), any case.
pub const WEATHER_PATTERN: &str = r"(?i)\bпогод\w*";

/// Replies with a generated weather summary. A failed fetch is reported directly and the model
/// is not called. The exchange is not stored in conversation history.
pub struct WeatherHandler {
    bot: Arc<dyn CoreBot>,
    client: WeatherClient,
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
    pattern: Regex,
}

impl WeatherHandler {
    pub fn new(
        bot: Arc<dyn CoreBot>,
        client: WeatherClient,
        llm: Arc<dyn LlmClient>,
        system_prompt: String,
    ) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            bot,
            client,
            llm,
            system_prompt,
            pattern: Regex::new(WEATHER_PATTERN)?,
        })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    async fn build_reply(&self, message: &Message) -> String {
        let report = match self.client.fetch().await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "step: weather fetch failed, model not called");
                return format!("❌ Ошибка получения погоды: {}", e.reason());
            }
        };

        if let Err(e) = self.bot.send_typing(&message.chat).await {
            warn!(error = %e, "Failed to send typing indicator");
        }

        let prompt = weather_narrative_prompt(
            report.temperature,
            report.feels_like,
            report.condition_text(),
        );
        match self
            .llm
            .complete(&[ChatMessage::user(prompt)], Some(&self.system_prompt))
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "step: weather narrative failed");
                e.user_message()
            }
        }
    }
}

#[async_trait]
impl Handler for WeatherHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !self.matches(&message.content) {
            return Ok(HandlerResponse::Continue);
        }

        info!("step: weather requested");
        let reply = self.build_reply(message).await;
        send_chunked(self.bot.as_ref(), message, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
