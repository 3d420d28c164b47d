//! GigaChat configuration: credentials, endpoints, sampling parameters, timeouts. Loaded from env.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_AUTH_URL: &str = "https://ngw.devices.sberbank.ru:9443/api/v2/oauth";
pub const DEFAULT_API_URL: &str = "https://gigachat.devices.sberbank.ru/api/v1/chat/completions";
pub const DEFAULT_SCOPE: &str = "GIGACHAT_API_PERS";
pub const DEFAULT_MODEL: &str = "GigaChat";

/// Settings for [`crate::GigaChatClient`].
#[derive(Debug, Clone)]
pub struct GigaChatConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Form `scope` sent to the auth endpoint.
    pub scope: String,
    pub auth_url: String,
    pub api_url: String,
    pub model: String,
    /// Cap on generated output length.
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    /// Validity horizon of a cached token.
    pub token_ttl_secs: u64,
    pub auth_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Skip TLS certificate validation for both GigaChat endpoints. Off unless explicitly enabled.
    pub accept_invalid_certs: bool,
}

impl GigaChatConfig {
    /// Defaults for everything except the credentials.
    pub fn with_credentials(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 512,
            temperature: 0.7,
            top_p: 0.1,
            token_ttl_secs: 1800,
            auth_timeout_secs: 10,
            request_timeout_secs: 30,
            accept_invalid_certs: false,
        }
    }

    /// Points the client at other endpoints (mock servers, proxies).
    pub fn with_endpoints(mut self, auth_url: impl Into<String>, api_url: impl Into<String>) -> Self {
        self.auth_url = auth_url.into();
        self.api_url = api_url.into();
        self
    }

    /// Load from environment variables. GIGACHAT_CLIENT_ID and GIGACHAT_CLIENT_SECRET are required.
    pub fn from_env() -> Result<Self> {
        let client_id = required("GIGACHAT_CLIENT_ID")?;
        let client_secret = required("GIGACHAT_CLIENT_SECRET")?;
        let defaults = Self::with_credentials(client_id, client_secret);

        Ok(Self {
            scope: env::var("GIGACHAT_SCOPE").unwrap_or(defaults.scope.clone()),
            auth_url: env::var("GIGACHAT_AUTH_URL").unwrap_or(defaults.auth_url.clone()),
            api_url: env::var("GIGACHAT_API_URL").unwrap_or(defaults.api_url.clone()),
            model: env::var("GIGACHAT_MODEL").unwrap_or(defaults.model.clone()),
            max_tokens: parsed("GIGACHAT_MAX_TOKENS", defaults.max_tokens)?,
            temperature: parsed("GIGACHAT_TEMPERATURE", defaults.temperature)?,
            top_p: parsed("GIGACHAT_TOP_P", defaults.top_p)?,
            token_ttl_secs: parsed("GIGACHAT_TOKEN_TTL_SECS", defaults.token_ttl_secs)?,
            accept_invalid_certs: parsed("GIGACHAT_ACCEPT_INVALID_CERTS", false)?,
            ..defaults
        })
    }

    /// Checks that both endpoints are valid URLs.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("GIGACHAT_AUTH_URL", &self.auth_url), ("GIGACHAT_API_URL", &self.api_url)] {
            if reqwest::Url::parse(value).is_err() {
                anyhow::bail!("{} is not a valid URL: {}", name, value);
            }
        }
        Ok(())
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("{} not set", name))
}

fn parsed<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
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
