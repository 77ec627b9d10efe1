//! Response Caching Middleware
//!
//! Axum middleware that applies a [`ResponseCache`] to a route. The inner
//! service's JSON body is captured on the way out and replayed on later hits.
//!
//! # Usage
//! ```ignore
//! let nav = CachedRoute::new(cache.clone(), 300);
//! Router::new()
//!     .route("/nav/data", get(nav_data_handler))
//!     .route_layer(middleware::from_fn_with_state(nav, cache_response));
//! ```

use std::sync::Arc;

use axum::{
    body::{Body, HttpBody},
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{CacheKey, ResponseCache, MAX_BODY_BYTES};
use crate::error::ApiError;

// == Cached Route ==
/// Middleware state: the shared cache plus this route's TTL.
#[derive(Clone, Debug)]
pub struct CachedRoute {
    pub cache: ResponseCache,
    pub ttl_seconds: u64,
    /// Bodies larger than this are passed through without being stored
    pub max_body_bytes: usize,
}

impl CachedRoute {
    pub fn new(cache: ResponseCache, ttl_seconds: u64) -> Self {
        Self {
            cache,
            ttl_seconds,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

// == Middleware ==
/// Serves GET requests from the cache and stores successful JSON responses.
///
/// A hit replies `200 OK` with the stored body. On a miss the inner response
/// keeps its status and headers; its body is stored only when the status is
/// `200 OK`, the only headers are the content type and length a hit would
/// reproduce, the content type is JSON, the size is known and within the
/// route's limit, and the bytes parse as JSON.
pub async fn cache_response(
    State(route): State<CachedRoute>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !CacheKey::is_cacheable_method(request.method()) {
        return Ok(next.run(request).await);
    }

    let key = CacheKey::from_request(request.method(), request.uri());
    if let Some(payload) = route.cache.lookup(&key).await {
        debug!(key = %key, "response cache hit");
        return Ok(Json(&*payload).into_response());
    }

    debug!(key = %key, "response cache miss");
    let response = next.run(request).await;

    if !is_storable(&response, route.max_body_bytes) {
        return Ok(response);
    }

    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, route.max_body_bytes)
        .await
        .map_err(|e| {
            warn!(key = %key, error = %e, "failed to buffer response body");
            ApiError::Internal(format!("Failed to read response body: {}", e))
        })?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(payload) => {
            route
                .cache
                .store(key, Arc::new(payload), route.ttl_seconds)
                .await;
        }
        Err(e) => {
            debug!(key = %key, error = %e, "response body is not JSON, not caching");
        }
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

// == Helpers ==
fn is_storable(response: &Response, max_body_bytes: usize) -> bool {
    if response.status() != StatusCode::OK || !is_json(response.headers()) {
        return false;
    }

    // A hit replays only the body, so any other header would be lost
    let replayable = response
        .headers()
        .keys()
        .all(|name| *name == header::CONTENT_TYPE || *name == header::CONTENT_LENGTH);
    if !replayable {
        return false;
    }

    // Streaming bodies of unknown length are never buffered
    match response.body().size_hint().upper() {
        Some(upper) => upper <= max_body_bytes as u64,
        None => false,
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| {
            let mime = ct.split(';').next().unwrap_or("").trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}
