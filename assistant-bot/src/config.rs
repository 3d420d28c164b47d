//! Application config: Telegram connectivity, GigaChat, data feeds and bot behaviour. Loaded from env.

use anyhow::{Context, Result};
use data_feeds::{DEFAULT_CBR_DAILY_URL, DEFAULT_YANDEX_WEATHER_URL};
use gigachat_client::GigaChatConfig;
use prompt::DEFAULT_SYSTEM_MESSAGE;
use std::env;
use telegram_bot::TelegramConfig;

pub const DEFAULT_MAX_INPUT_CHARS: usize = 2000;
pub const DEFAULT_TRIGGER_WORDS: &str = "бот";

/// Everything the assistant needs to run.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub telegram: TelegramConfig,
    pub gigachat: GigaChatConfig,
    /// YANDEX_WEATHER_API_KEY
    pub weather_api_key: String,
    pub weather_url: String,
    pub cbr_daily_url: String,
    pub system_prompt: String,
    /// Per-user history cap (MAX_DIALOG_HISTORY).
    pub history_limit: usize,
    /// Longest accepted chat message, in chars (MAX_INPUT_LENGTH).
    pub max_input_chars: usize,
    /// In groups, answer only messages addressed to the bot (TRIGGER_GATING).
    pub trigger_gating: bool,
    /// Leading phrases that address the bot (TRIGGER_WORDS, comma separated).
    pub trigger_words: Vec<String>,
}

impl AssistantConfig {
    /// Loads from environment variables. `token` overrides TELEGRAM_TOKEN if provided.
    /// Fails when a required credential is missing or a numeric value does not parse.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::load(token)?;
        let gigachat = GigaChatConfig::from_env()?;
        let weather_api_key = env::var("YANDEX_WEATHER_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .context("YANDEX_WEATHER_API_KEY not set")?;

        let system_prompt = env::var("SYSTEM_PROMPT")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_MESSAGE.to_string());

        Ok(Self {
            telegram,
            gigachat,
            weather_api_key,
            weather_url: env::var("YANDEX_WEATHER_URL")
                .unwrap_or_else(|_| DEFAULT_YANDEX_WEATHER_URL.to_string()),
            cbr_daily_url: env::var("CBR_DAILY_URL")
                .unwrap_or_else(|_| DEFAULT_CBR_DAILY_URL.to_string()),
            system_prompt,
            history_limit: parse_env("MAX_DIALOG_HISTORY", conversation::DEFAULT_HISTORY_LIMIT)?,
            max_input_chars: parse_env("MAX_INPUT_LENGTH", DEFAULT_MAX_INPUT_CHARS)?,
            trigger_gating: parse_env("TRIGGER_GATING", false)?,
            trigger_words: parse_trigger_words(
                &env::var("TRIGGER_WORDS").unwrap_or_else(|_| DEFAULT_TRIGGER_WORDS.to_string()),
            ),
        })
    }

    /// Checks URL-shaped values and limits.
    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        self.gigachat.validate()?;
        for (name, value) in [("YANDEX_WEATHER_URL", &self.weather_url), ("CBR_DAILY_URL", &self.cbr_daily_url)] {
            if reqwest::Url::parse(value).is_err() {
                anyhow::bail!("{} is not a valid URL: {}", name, value);
            }
        }
        if self.history_limit == 0 {
            anyhow::bail!("MAX_DIALOG_HISTORY must be at least 1");
        }
        if self.trigger_gating && self.trigger_words.is_empty() {
            tracing::warn!("TRIGGER_GATING is on but TRIGGER_WORDS is empty; only mentions and replies pass");
        }
        Ok(())
    }
}

fn parse_env<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has invalid value {:?}: {}", name, raw, e)),
        _ => Ok(default),
    }
}

/// Splits a comma-separated list, trimming and dropping empty entries.
pub fn parse_trigger_words(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}
