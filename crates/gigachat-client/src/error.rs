//! Error types for token acquisition and completion requests.

use thiserror::Error;

/// Failure to obtain an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("auth endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("auth request failed: {0}")]
    Transport(String),

    #[error("malformed auth response: {0}")]
    MalformedResponse(String),
}

/// Failure of a completion request (including the token step before it).
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("completion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion request timed out")]
    Timeout,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("completion request failed: {0}")]
    Transport(String),

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

impl CompletionError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CompletionError::Timeout
        } else if err.is_connect() {
            CompletionError::Connection(err.to_string())
        } else {
            CompletionError::Transport(err.to_string())
        }
    }

    /// Short user-facing text for chat replies. Never includes response bodies or credentials.
    pub fn user_message(&self) -> String {
        match self {
            CompletionError::Auth(_) => "❌ Ошибка подключения к GigaChat".to_string(),
            CompletionError::Status { status, .. } => format!("⚠️ Ошибка сервиса ({})", status),
            CompletionError::Timeout => "⏱️ Истёк таймаут. Попробуйте позже.".to_string(),
            CompletionError::Connection(_) => "🌐 Ошибка подключения".to_string(),
            CompletionError::Transport(_) | CompletionError::MalformedResponse(_) => {
                "⚠️ Ошибка сервиса. Попробуйте позже.".to_string()
            }
        }
    }
}
