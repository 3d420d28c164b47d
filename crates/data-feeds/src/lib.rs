//! # Data feeds
//!
//! Two read-only HTTP fetchers used by the assistant's non-chat replies:
//!
//! - [`WeatherClient`]: current conditions for a fixed location from Yandex Weather.
//! - [`ExchangeRateClient`]: USD rate with day-over-day delta from the CBR daily JSON feed.
//!
//! Both return `Result<_, FetchError>`; callers decide how to word failures.

use std::time::Duration;
use thiserror::Error;

pub mod exchange_rate;
pub mod weather;

pub use exchange_rate::{ExchangeRateClient, RateDirection, UsdRate, DEFAULT_CBR_DAILY_URL};
pub use weather::{
    condition_description, WeatherClient, WeatherReport, DEFAULT_YANDEX_WEATHER_URL,
    LIPETSK_LAT, LIPETSK_LON,
};

/// Request timeout for both feeds.
pub const FEED_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure of a feed request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("feed returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("feed request timed out")]
    Timeout,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("feed request failed: {0}")]
    Transport(String),

    #[error("malformed feed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::MalformedResponse(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }

    /// Short Russian reason, suitable for appending to a user-facing error line.
    pub fn reason(&self) -> String {
        match self {
            FetchError::Status { status, .. } => format!("сервис вернул код {}", status),
            FetchError::Timeout => "истёк таймаут".to_string(),
            FetchError::Connection(_) => "нет соединения с сервисом".to_string(),
            FetchError::Transport(_) => "сбой запроса".to_string(),
            FetchError::MalformedResponse(_) => "некорректный ответ сервиса".to_string(),
        }
    }
}

pub(crate) fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(FEED_TIMEOUT).build()
}

/// Reads a non-2xx response into [`FetchError::Status`], keeping at most 200 chars of the body.
pub(crate) async fn status_error(response: reqwest::Response) -> FetchError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    FetchError::Status {
        status,
        body: body.chars().take(200).collect(),
    }
}
