//! Cached GigaChat access token with a fixed validity horizon.

use chrono::{DateTime, Utc};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::debug;

/// Validity horizon used when none is configured.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(1800);

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    /// Monotonic issue time; the only input to expiry.
    issued: Instant,
    /// Wall-clock issue time, for logs only.
    issued_at: DateTime<Utc>,
}

/// Holds at most one bearer token and when it was issued.
///
/// Shared by every request of a [`crate::GigaChatClient`]; reads and writes go through an
/// internal lock, so concurrent completions observe either the old or the new token, never a
/// torn one. Two callers that miss at the same time may both fetch a token; the last write wins.
/// Age is measured on the monotonic clock, so wall-clock adjustments cannot extend a token's life.
#[derive(Debug)]
pub struct CredentialCache {
    ttl: Duration,
    inner: RwLock<Option<CachedToken>>,
}

impl CredentialCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached token if it is younger than the TTL.
    pub fn get_token(&self) -> Option<String> {
        self.get_token_at(Instant::now())
    }

    /// Same as [`Self::get_token`] but against an explicit clock reading. A reading earlier
    /// than the issue time counts as expired.
    pub fn get_token_at(&self, now: Instant) -> Option<String> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let cached = guard.as_ref()?;
        let fresh = now
            .checked_duration_since(cached.issued)
            .map(|age| age < self.ttl)
            .unwrap_or(false);
        if fresh {
            Some(cached.value.clone())
        } else {
            debug!(issued_at = %cached.issued_at, "cached token expired");
            None
        }
    }

    /// Replaces the cached token, stamping it with the current time.
    pub fn store(&self, token: impl Into<String>) {
        self.store_at(token, Instant::now());
    }

    pub fn store_at(&self, token: impl Into<String>, issued: Instant) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(CachedToken {
            value: token.into(),
            issued,
            issued_at: Utc::now(),
        });
    }

    /// Drops the cached token (e.g. after the API rejected it).
    pub fn clear(&self) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

impl Default for CredentialCache {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_TTL)
    }
}
