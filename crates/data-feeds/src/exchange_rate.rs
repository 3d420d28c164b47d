//! USD exchange rate from the CBR daily JSON feed.

use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::{http_client, status_error, FetchError};

pub const DEFAULT_CBR_DAILY_URL: &str = "https://www.cbr-xml-daily.ru/daily_json.js";

/// Today's and the previous published USD rate, in roubles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsdRate {
    pub current: f64,
    pub previous: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDirection {
    Up,
    Down,
    Flat,
}

impl UsdRate {
    pub fn delta(&self) -> f64 {
        self.current - self.previous
    }

    /// Decided on the delta rounded to kopecks, so float noise reads as flat.
    pub fn direction(&self) -> RateDirection {
        let cents = (self.delta() * 100.0).round() as i64;
        match cents {
            c if c > 0 => RateDirection::Up,
            c if c < 0 => RateDirection::Down,
            _ => RateDirection::Flat,
        }
    }

    /// e.g. `💵 Курс USD ЦБ РФ: 92.50 ₽ ⬆️ +0.40`
    pub fn format_rate(&self) -> String {
        let delta = self.delta().abs();
        let change = match self.direction() {
            RateDirection::Up => format!("⬆️ +{:.2}", delta),
            RateDirection::Down => format!("⬇️ -{:.2}", delta),
            RateDirection::Flat => "➡️ 0.00".to_string(),
        };
        format!("💵 Курс USD ЦБ РФ: {:.2} ₽ {}", self.current, change)
    }
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(rename = "Valute")]
    valute: HashMap<String, Valute>,
}

#[derive(Debug, Deserialize)]
struct Valute {
    #[serde(rename = "Value")]
    value: f64,
    #[serde(rename = "Previous")]
    previous: f64,
}

#[derive(Debug, Clone)]
pub struct ExchangeRateClient {
    client: Client,
    url: String,
}

impl ExchangeRateClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: http_client()?,
            url: DEFAULT_CBR_DAILY_URL.to_string(),
        })
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub async fn fetch_usd_rate(&self) -> Result<UsdRate, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        if !response.status().is_success() {
            let err = status_error(response).await;
            warn!(error = %err, "exchange rate request failed");
            return Err(err);
        }

        // The feed is served as application/javascript, so decode the text explicitly.
        let body = response.text().await.map_err(FetchError::from_reqwest)?;
        let parsed: DailyResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
        let usd = parsed
            .valute
            .get("USD")
            .ok_or_else(|| FetchError::MalformedResponse("USD missing from feed".to_string()))?;

        let rate = UsdRate {
            current: usd.value,
            previous: usd.previous,
        };
        info!(current = rate.current, previous = rate.previous, "USD rate fetched");
        Ok(rate)
    }

    /// Formatted rate, or a formatted error line. Never fails.
    pub async fn fetch_usd_rate_text(&self) -> String {
        match self.fetch_usd_rate().await {
            Ok(rate) => rate.format_rate(),
            Err(e) => format!("❌ Ошибка получения курса: {}", e.reason()),
        }
    }
}
