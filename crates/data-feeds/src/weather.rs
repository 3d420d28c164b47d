//! Yandex Weather client for a fixed location (Lipetsk).

use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{http_client, status_error, FetchError};

pub const DEFAULT_YANDEX_WEATHER_URL: &str = "https://api.weather.yandex.ru/v2/forecast";
pub const LIPETSK_LAT: &str = "52.6031";
pub const LIPETSK_LON: &str = "39.5708";

/// Current conditions: temperatures in °C and the provider's condition code.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: String,
}

impl WeatherReport {
    /// Russian phrase for [`Self::condition`].
    pub fn condition_text(&self) -> &str {
        condition_description(&self.condition)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    fact: Fact,
}

#[derive(Debug, Deserialize)]
struct Fact {
    temp: f64,
    feels_like: f64,
    condition: String,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    url: String,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: http_client()?,
            api_key: api_key.into(),
            url: DEFAULT_YANDEX_WEATHER_URL.to_string(),
        })
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// One GET for the current `fact` block. Any non-2xx, transport fault or missing field is an error.
    pub async fn fetch(&self) -> Result<WeatherReport, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header("X-Yandex-Weather-Key", &self.api_key)
            .query(&[
                ("lat", LIPETSK_LAT),
                ("lon", LIPETSK_LON),
                ("lang", "ru_RU"),
                ("limit", "1"),
                ("hours", "false"),
            ])
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        if !response.status().is_success() {
            let err = status_error(response).await;
            warn!(error = %err, "weather request failed");
            return Err(err);
        }

        let parsed: ForecastResponse = response.json().await.map_err(FetchError::from_reqwest)?;
        let report = WeatherReport {
            temperature: parsed.fact.temp,
            feels_like: parsed.fact.feels_like,
            condition: parsed.fact.condition,
        };
        info!(
            temperature = report.temperature,
            feels_like = report.feels_like,
            condition = %report.condition,
            "weather fetched"
        );
        Ok(report)
    }
}

/// Maps a Yandex condition code to a Russian phrase. Unknown codes are returned unchanged.
pub fn condition_description(code: &str) -> &str {
    match code {
        "clear" => "ясно",
        "partly-cloudy" => "малооблачно",
        "cloudy" => "облачно с прояснениями",
        "overcast" => "пасмурно",
        "drizzle" => "морось",
        "light-rain" => "небольшой дождь",
        "rain" => "дождь",
        "moderate-rain" => "умеренно сильный дождь",
        "heavy-rain" => "сильный дождь",
        "continuous-heavy-rain" => "длительный сильный дождь",
        "showers" => "ливень",
        "wet-snow" => "дождь со снегом",
        "light-snow" => "небольшой снег",
        "snow" => "снег",
        "snow-showers" => "снегопад",
        "hail" => "град",
        "thunderstorm" => "гроза",
        "thunderstorm-with-rain" => "дождь с грозой",
        "thunderstorm-with-hail" => "гроза с градом",
        other => other,
    }
}
