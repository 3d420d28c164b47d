//! Mock [`gigachat_client::LlmClient`]: records each call and answers with a fixed reply or error.

use async_trait::async_trait;
use gigachat_client::{CompletionError, LlmClient};
use prompt::ChatMessage;
use std::sync::Mutex;

/// One recorded completion request.
#[derive(Debug, Clone)]
pub struct LlmCall {
    pub history: Vec<ChatMessage>,
    pub system_hint: Option<String>,
}

pub struct MockLlm {
    reply: String,
    fail_status: Option<u16>,
    calls: Mutex<Vec<LlmCall>>,
}

impl MockLlm {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            fail_status: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `CompletionError::Status { status }`.
    #[allow(dead_code)]
    pub fn failing(status: u16) -> Self {
        Self {
            reply: String::new(),
            fail_status: Some(status),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<LlmCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(
        &self,
        history: &[ChatMessage],
        system_hint: Option<&str>,
    ) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(LlmCall {
            history: history.to_vec(),
            system_hint: system_hint.map(String::from),
        });
        match self.fail_status {
            Some(status) => Err(CompletionError::Status {
                status,
                body: "upstream failure".to_string(),
            }),
            None => Ok(self.reply.clone()),
        }
    }
}
