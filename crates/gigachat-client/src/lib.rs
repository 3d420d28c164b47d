//! # GigaChat client
//!
//! Defines the [`LlmClient`] trait and its GigaChat implementation. Transport-agnostic;
//! used by the assistant-bot handlers.
//!
//! A completion is a two-step exchange: client id/secret are traded for a bearer token at the
//! auth endpoint (cached in [`CredentialCache`] for its validity horizon), then the conversation
//! history is posted to the completion endpoint with that token. Failures come back as
//! [`AuthError`] / [`CompletionError`]; nothing is retried.

use async_trait::async_trait;
use prompt::ChatMessage;

mod client;
mod config;
mod credential;
mod error;

pub use client::GigaChatClient;
pub use config::GigaChatConfig;
pub use credential::{CredentialCache, DEFAULT_TOKEN_TTL};
pub use error::{AuthError, CompletionError};

/// Completion interface: turns a bounded conversation history into the model's reply text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the reply for `history`. When `system_hint` is set it is sent as a leading system message.
    async fn complete(
        &self,
        history: &[ChatMessage],
        system_hint: Option<&str>,
    ) -> Result<String, CompletionError>;
}

/// Masks a secret for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the secret.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Cuts a response body to at most `max_chars` characters for logs and error values.
pub(crate) fn truncate_body(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        body.to_string()
    } else {
        let mut out: String = body.chars().take(max_chars).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body_short_is_unchanged() {
        assert_eq!(truncate_body("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_body_counts_chars_not_bytes() {
        assert_eq!(truncate_body("привет", 3), "при…");
    }
}
