//! HTTP client for the GigaChat auth and chat-completions endpoints.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use prompt::ChatMessage;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::GigaChatConfig;
use crate::credential::CredentialCache;
use crate::error::{AuthError, CompletionError};
use crate::{mask_token, truncate_body, LlmClient};

/// Longest response body kept in errors and logs.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// GigaChat completion client. One instance is shared by all chats; the token cache is shared with it.
#[derive(Debug)]
pub struct GigaChatClient {
    client: Client,
    config: GigaChatConfig,
    credentials: CredentialCache,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<&'a ChatMessage>,
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl GigaChatClient {
    /// Builds the HTTP client. Certificate validation is disabled only when
    /// `config.accept_invalid_certs` is set.
    pub fn new(config: GigaChatConfig) -> Result<Self, reqwest::Error> {
        if config.accept_invalid_certs {
            warn!("TLS certificate validation disabled for GigaChat endpoints");
        }
        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        let credentials = CredentialCache::new(Duration::from_secs(config.token_ttl_secs));
        info!(model = %config.model, api_url = %config.api_url, "GigaChat client created");
        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    pub fn config(&self) -> &GigaChatConfig {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialCache {
        &self.credentials
    }

    /// Exchanges client id/secret for a fresh access token and stores it in the cache.
    pub async fn acquire_token(&self) -> Result<String, AuthError> {
        let basic = BASE64.encode(format!("{}:{}", self.config.client_id, self.config.client_secret));
        let rq_uid = Uuid::new_v4().to_string();
        debug!(rq_uid = %rq_uid, url = %self.config.auth_url, "requesting access token");

        let response = self
            .client
            .post(&self.config.auth_url)
            .header("Authorization", format!("Basic {}", basic))
            .header("RqUID", &rq_uid)
            .header("Accept", "application/json")
            .form(&[("scope", self.config.scope.as_str())])
            .timeout(Duration::from_secs(self.config.auth_timeout_secs))
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "auth endpoint rejected credentials");
            return Err(AuthError::Status {
                status: status.as_u16(),
                body: truncate_body(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
        if parsed.access_token.is_empty() {
            return Err(AuthError::MalformedResponse("empty access_token".to_string()));
        }
        info!(token = %mask_token(&parsed.access_token), "access token acquired");
        self.credentials.store(parsed.access_token.clone());
        Ok(parsed.access_token)
    }

    async fn token(&self) -> Result<String, AuthError> {
        match self.credentials.get_token() {
            Some(token) => Ok(token),
            None => self.acquire_token().await,
        }
    }
}

#[async_trait]
impl LlmClient for GigaChatClient {
    async fn complete(
        &self,
        history: &[ChatMessage],
        system_hint: Option<&str>,
    ) -> Result<String, CompletionError> {
        let token = self.token().await?;

        let system = system_hint.map(ChatMessage::system);
        let messages: Vec<&ChatMessage> = system.iter().chain(history.iter()).collect();
        let body = CompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            max_tokens: self.config.max_tokens,
        };

        debug!(messages = body.messages.len(), "sending completion request");
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&token)
            .header("Accept", "application/json")
            .json(&body)
            .timeout(Duration::from_secs(self.config.request_timeout_secs))
            .send()
            .await
            .map_err(CompletionError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                // Token revoked before its horizon; the next call fetches a new one.
                self.credentials.clear();
            }
            let text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "completion endpoint returned an error");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: truncate_body(&text, MAX_ERROR_BODY_CHARS),
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;
        let reply = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CompletionError::MalformedResponse("no choices".to_string()))?;
        if reply.trim().is_empty() {
            warn!("completion endpoint returned empty content");
            return Err(CompletionError::MalformedResponse("empty content".to_string()));
        }

        info!(reply_len = reply.chars().count(), "completion received");
        Ok(reply)
    }
}
