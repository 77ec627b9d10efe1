//! Cache Store Module
//!
//! Key to response map with lazy TTL expiration. The store is plain data and
//! takes the current time as an argument; locking and clocks live in
//! [`ResponseCache`](crate::cache::ResponseCache).

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::cache::{CacheStats, ResponseEntry};

// == Response Store ==
/// Response storage with TTL support.
#[derive(Debug, Default)]
pub struct ResponseStore {
    /// Key to entry storage
    entries: HashMap<String, ResponseEntry>,
    /// Performance statistics
    stats: CacheStats,
}

impl ResponseStore {
    // == Constructor ==
    /// Creates an empty store with zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Returns the payload stored under `key` if it has not expired.
    ///
    /// An expired entry is removed here and counted as a miss.
    pub fn get(&mut self, key: &str, now_ms: u64) -> Option<Arc<Value>> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired(now_ms) {
                self.entries.remove(key);
                self.stats.record_expirations(1);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                return None;
            }

            let payload = Arc::clone(&entry.payload);
            self.stats.record_hit();
            Some(payload)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Insert ==
    /// Stores a payload, replacing whatever was under `key`.
    pub fn insert(&mut self, key: String, payload: Arc<Value>, ttl_seconds: u64, now_ms: u64) {
        self.entries
            .insert(key, ResponseEntry::new(payload, ttl_seconds, now_ms));
        self.stats.record_store();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Remove ==
    /// Removes a single entry. Returns whether one was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Clear ==
    /// Removes every entry. Returns the number removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self, now_ms: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now_ms));
        let removed = before - self.entries.len();

        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns true if an entry (expired or not) is held under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Len ==
    /// Returns the number of entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> Arc<Value> {
        Arc::new(v)
    }

    #[test]
    fn test_store_new() {
        let store = ResponseStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_insert_and_get() {
        let mut store = ResponseStore::new();
        store.insert("GET:/nav/data".to_string(), payload(json!([1, 2])), 60, 0);

        assert_eq!(*store.get("GET:/nav/data", 10).unwrap(), json!([1, 2]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_hit_shares_allocation() {
        let mut store = ResponseStore::new();
        let stored = payload(json!({"a": 1}));
        store.insert("k".to_string(), Arc::clone(&stored), 60, 0);

        let first = store.get("k", 1).unwrap();
        let second = store.get("k", 2).unwrap();
        assert!(Arc::ptr_eq(&stored, &first));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = ResponseStore::new();
        assert!(store.get("missing", 0).is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_expired_entry_is_purged_on_read() {
        let mut store = ResponseStore::new();
        store.insert("k".to_string(), payload(json!("v")), 5, 0);

        assert!(store.get("k", 4_000).is_some());
        assert!(store.contains_key("k"));

        assert!(store.get("k", 6_000).is_none());
        assert!(!store.contains_key("k"));

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = ResponseStore::new();
        store.insert("k".to_string(), payload(json!(1)), 60, 0);
        store.insert("k".to_string(), payload(json!(2)), 60, 0);

        assert_eq!(*store.get("k", 0).unwrap(), json!(2));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().stores, 2);
    }

    #[test]
    fn test_store_overwrite_resets_ttl() {
        let mut store = ResponseStore::new();
        store.insert("k".to_string(), payload(json!(1)), 5, 0);
        store.insert("k".to_string(), payload(json!(2)), 5, 4_000);

        assert!(store.get("k", 8_000).is_some());
    }

    #[test]
    fn test_store_remove() {
        let mut store = ResponseStore::new();
        store.insert("k".to_string(), payload(json!(1)), 60, 0);

        assert!(store.remove("k"));
        assert!(!store.remove("k"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_clear() {
        let mut store = ResponseStore::new();
        store.insert("a".to_string(), payload(json!(1)), 60, 0);
        store.insert("b".to_string(), payload(json!(2)), 60, 0);

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(store.stats().total_entries, 0);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = ResponseStore::new();
        store.insert("short".to_string(), payload(json!(1)), 1, 0);
        store.insert("long".to_string(), payload(json!(2)), 10, 0);

        let removed = store.cleanup_expired(1_500);
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("long", 1_500).is_some());
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_store_mixed_ttls() {
        let mut store = ResponseStore::new();
        store.insert("nav".to_string(), payload(json!(1)), 300, 0);
        store.insert("asset".to_string(), payload(json!(2)), 5, 0);

        assert!(store.get("asset", 5_000).is_none());
        assert!(store.get("nav", 5_000).is_some());
    }
}
