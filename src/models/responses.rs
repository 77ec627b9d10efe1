//! Response DTOs for the OTT API
//!
//! Bodies of the admin and health endpoints. The data endpoints reply with
//! the JSON they read from their sources.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the cache clear endpoint (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    /// Human readable outcome
    pub message: String,
    /// Number of entries removed
    pub removed: usize,
    /// The key that was targeted, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl ClearCacheResponse {
    pub fn new(key: Option<String>, removed: usize) -> Self {
        let message = match &key {
            Some(key) => format!("Cache entry '{}' cleared", key),
            None => "Cache cleared".to_string(),
        };
        Self {
            message,
            removed,
            key,
        }
    }
}

/// Response body for the stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of response cache hits
    pub hits: u64,
    /// Number of response cache misses
    pub misses: u64,
    /// Number of responses stored
    pub stores: u64,
    /// Number of entries dropped after their TTL elapsed
    pub expirations: u64,
    /// Current number of cached responses
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Number of data files held by the source cache
    pub source_entries: usize,
}

impl StatsResponse {
    pub fn new(stats: CacheStats, source_entries: usize) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            stores: stats.stores,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            source_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
