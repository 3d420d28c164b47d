//! # Prompt
//!
//! Chat message model and the fixed prompt texts sent to the completion provider.
//!
//! ## Contents
//!
//! - [`ChatMessage`] / [`MessageRole`]: one element of the provider's `messages` array. The same
//!   type is stored in per-user conversation history.
//! - [`DEFAULT_SYSTEM_MESSAGE`]: system hint used when no custom prompt is configured.
//! - [`weather_narrative_prompt`]: turns raw weather measurements into a request for a short
//!   generated narrative.
//!
//! ## External interactions
//!
//! - **Completion provider**: [`ChatMessage`] serializes to `{"role": "...", "content": "..."}`.

use serde::{Deserialize, Serialize};

/// Role of a message, one-to-one with the chat-completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of the `messages` array.
/// Immutable once created; history is rewritten, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Default system instruction when no custom system message is configured.
pub const DEFAULT_SYSTEM_MESSAGE: &str =
    "Ты полезный семейный AI помощник. Отвечай дружелюбно и конструктивно.";

/// Name of the fixed weather location, used in the narrative prompt.
pub const WEATHER_LOCATION: &str = "Липецк";

/// Builds the user prompt asking the model for a short weather narrative.
///
/// `condition` should already be human-readable (e.g. "небольшой дождь"), not a provider code.
pub fn weather_narrative_prompt(temperature: f64, feels_like: f64, condition: &str) -> String {
    format!(
        "Сейчас в городе {location}: температура {temperature}°C, ощущается как {feels_like}°C, {condition}. \
         Напиши короткую дружелюбную сводку погоды для семьи (2-3 предложения) и дай совет, как одеться.",
        location = WEATHER_LOCATION,
        temperature = temperature,
        feels_like = feels_like,
        condition = condition,
    )
}
