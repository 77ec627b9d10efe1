//! Cache Entry Module
//!
//! Defines a stored response body together with its insertion time and TTL.

use std::sync::Arc;

use serde_json::Value;

// == Response Entry ==
/// A cached response body.
#[derive(Debug, Clone)]
pub struct ResponseEntry {
    /// The body to replay, shared with every hit
    pub payload: Arc<Value>,
    /// Insertion timestamp (Unix milliseconds)
    pub stored_at_ms: u64,
    /// Lifetime in milliseconds
    pub ttl_ms: u64,
}

impl ResponseEntry {
    // == Constructor ==
    /// Creates an entry stored at `now_ms` that lives for `ttl_seconds`.
    pub fn new(payload: Arc<Value>, ttl_seconds: u64, now_ms: u64) -> Self {
        Self {
            payload,
            stored_at_ms: now_ms,
            ttl_ms: ttl_seconds.saturating_mul(1000),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once `now - stored_at >= ttl`, so a zero TTL is
    /// expired immediately and the boundary instant itself is already stale.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.stored_at_ms) >= self.ttl_ms
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, `0` once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.ttl_ms
            .saturating_sub(now_ms.saturating_sub(self.stored_at_ms))
    }
}
