//! Response Cache Module
//!
//! Shared handle over a [`ResponseStore`] plus the `wrap` decorator that turns
//! a JSON-producing handler into a cached one.
//!
//! Concurrent cold misses on the same key are not coalesced: each caller runs
//! the handler and the last insert wins. The store lock is only held for the
//! lookup and the insert, never while the handler runs.

use std::future::Future;
use std::sync::Arc;

use axum::http::{Method, Uri};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheKey, CacheStats, Clock, ResponseStore, SystemClock};

// == Request Info ==
/// The parts of a request the cache needs: method and full path + query.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    pub uri: Uri,
}

impl RequestInfo {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self { method, uri }
    }

    /// Shorthand for a GET request.
    pub fn get(uri: Uri) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::from_request(&self.method, &self.uri)
    }
}

// == Response Cache ==
/// Cloneable handle to a process-local response cache.
///
/// Constructed once by whatever composes the server and passed to routes by
/// value; clones share the same store.
#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<RwLock<ResponseStore>>,
    clock: Arc<dyn Clock>,
    default_ttl: u64,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates an empty cache on the system clock.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL in seconds for routes built with [`CachedRoute::new`]
    ///
    /// [`CachedRoute::new`]: crate::cache::CachedRoute::new
    pub fn new(default_ttl: u64) -> Self {
        Self::with_clock(default_ttl, Arc::new(SystemClock))
    }

    /// Creates an empty cache on a caller-supplied clock.
    pub fn with_clock(default_ttl: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(RwLock::new(ResponseStore::new())),
            clock,
            default_ttl,
        }
    }

    /// Default TTL in seconds.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    // == Lookup ==
    /// Returns the live payload for `key`, purging it if it has expired.
    pub async fn lookup(&self, key: &CacheKey) -> Option<Arc<Value>> {
        let now = self.clock.now_ms();
        self.store.write().await.get(key.as_str(), now)
    }

    // == Store ==
    /// Stores `payload` under `key` for `ttl_seconds`.
    pub async fn store(&self, key: CacheKey, payload: Arc<Value>, ttl_seconds: u64) {
        let now = self.clock.now_ms();
        self.store
            .write()
            .await
            .insert(key.into_string(), payload, ttl_seconds, now);
    }

    // == Clear ==
    /// Removes one entry when `key` is given, otherwise empties the cache.
    ///
    /// `key` may list its query parameters in request order; it is normalized
    /// the same way stored keys are. A missing key is not an error. Returns
    /// the number of entries removed.
    pub async fn clear(&self, key: Option<&str>) -> usize {
        let mut store = self.store.write().await;
        match key {
            Some(key) => usize::from(store.remove(CacheKey::parse(key).as_str())),
            None => store.clear(),
        }
    }

    // == Cleanup Expired ==
    /// Drops every expired entry. Returns the number removed.
    pub async fn cleanup_expired(&self) -> usize {
        let now = self.clock.now_ms();
        self.store.write().await.cleanup_expired(now)
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    // == Wrap ==
    /// Decorates `handler` so that successful GET results are cached for
    /// `ttl_seconds`.
    ///
    /// # Example
    /// ```ignore
    /// let nav = cache.wrap(|_req| async { Ok::<_, ApiError>(json!({"nodes": []})) }, 300);
    /// let body = nav.call(RequestInfo::get("/nav/data".parse()?)).await?;
    /// ```
    pub fn wrap<H>(&self, handler: H, ttl_seconds: u64) -> CachedHandler<H> {
        CachedHandler {
            cache: self.clone(),
            handler,
            ttl_seconds,
        }
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

// == Cached Handler ==
/// A handler wrapped by [`ResponseCache::wrap`].
#[derive(Clone)]
pub struct CachedHandler<H> {
    cache: ResponseCache,
    handler: H,
    ttl_seconds: u64,
}

impl<H, Fut, E> CachedHandler<H>
where
    H: Fn(RequestInfo) -> Fut,
    Fut: Future<Output = Result<Value, E>>,
{
    /// Serves `req` from the cache or from the wrapped handler.
    ///
    /// - Non-GET requests always run the handler and never touch the cache.
    /// - A live entry is returned as the same `Arc` that was stored; the
    ///   handler is not invoked.
    /// - Otherwise the handler runs; `Ok` bodies are stored, errors are
    ///   returned unchanged and nothing is stored.
    pub async fn call(&self, req: RequestInfo) -> Result<Arc<Value>, E> {
        if !CacheKey::is_cacheable_method(&req.method) {
            return (self.handler)(req).await.map(Arc::new);
        }

        let key = req.cache_key();
        if let Some(payload) = self.cache.lookup(&key).await {
            debug!(key = %key, "response cache hit");
            return Ok(payload);
        }

        debug!(key = %key, "response cache miss");
        let payload = Arc::new((self.handler)(req).await?);
        self.cache
            .store(key, Arc::clone(&payload), self.ttl_seconds)
            .await;
        Ok(payload)
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }
}
