//! # Conversation Store
//!
//! Per-user conversation history kept in process memory, bounded to the most recent
//! `limit` entries. Empty at startup, lost on restart.
//!
//! ## Example
//!
//! ```rust
//! use conversation::ConversationStore;
//! use prompt::MessageRole;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = ConversationStore::new(15);
//!     store.append(42, MessageRole::User, "привет").await;
//!     assert_eq!(store.read(42).await.len(), 1);
//!     store.clear(42).await;
//!     assert!(store.read(42).await.is_empty());
//! }
//! ```
//!
//! ## Thread Safety
//!
//! Histories live behind `Arc<RwLock<>>`; clones share the same data. Each operation takes the
//! lock once and releases it before returning, so no guard is held across an `.await`.

use prompt::{ChatMessage, MessageRole};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Default history cap per user.
pub const DEFAULT_HISTORY_LIMIT: usize = 15;

/// In-memory history keyed by Telegram user id.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    limit: usize,
    histories: Arc<RwLock<HashMap<i64, Vec<ChatMessage>>>>,
}

impl ConversationStore {
    /// Creates an empty store keeping at most `limit` entries per user (at least one).
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            histories: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Appends one entry; on overflow the history becomes its most recent `limit` entries.
    pub async fn append(&self, user_id: i64, role: MessageRole, content: impl Into<String>) {
        let mut histories = self.histories.write().await;
        let history = histories.entry(user_id).or_default();
        history.push(ChatMessage::new(role, content));
        if history.len() > self.limit {
            let excess = history.len() - self.limit;
            *history = history.split_off(excess);
            debug!(user_id, dropped = excess, "history trimmed to limit");
        }
    }

    /// Snapshot of the user's history in insertion order; empty for unknown users.
    pub async fn read(&self, user_id: i64) -> Vec<ChatMessage> {
        let histories = self.histories.read().await;
        histories.get(&user_id).cloned().unwrap_or_default()
    }

    /// Forgets the user's history. No-op for unknown users.
    pub async fn clear(&self, user_id: i64) {
        let mut histories = self.histories.write().await;
        if histories.remove(&user_id).is_some() {
            debug!(user_id, "history cleared");
        }
    }

    pub async fn len(&self, user_id: i64) -> usize {
        let histories = self.histories.read().await;
        histories.get(&user_id).map(Vec::len).unwrap_or(0)
    }

    pub async fn is_empty(&self, user_id: i64) -> bool {
        self.len(user_id).await == 0
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
