//! Cache Key Module
//!
//! Derives deterministic cache keys from a request's method and URI.

use std::fmt;

use axum::http::{Method, Uri};

// == Cache Key ==
/// Identity of a cached response: `METHOD:path[?query]`.
///
/// Query parameters are stably sorted by name, so `?b=2&a=1` and `?a=1&b=2`
/// share a key. Repeated parameters keep their relative order and values are
/// compared as raw (still percent-encoded) text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    // == Constructor ==
    /// Builds the key for a request.
    pub fn from_request(method: &Method, uri: &Uri) -> Self {
        let mut key = format!("{}:{}", method.as_str(), uri.path());

        if let Some(query) = uri.query() {
            let normalized = normalize_query(query);
            if !normalized.is_empty() {
                key.push('?');
                key.push_str(&normalized);
            }
        }

        Self(key)
    }

    // == Parse ==
    /// Rebuilds a key from its `METHOD:uri` text, normalizing the query.
    ///
    /// Text that does not split into a valid method and URI is kept verbatim.
    pub fn parse(raw: &str) -> Self {
        let parsed = raw.split_once(':').and_then(|(method, uri)| {
            let method = Method::from_bytes(method.as_bytes()).ok()?;
            let uri = uri.parse::<Uri>().ok()?;
            Some(Self::from_request(&method, &uri))
        });
        parsed.unwrap_or_else(|| Self::from(raw))
    }

    // == Cacheable Method ==
    /// Only GET responses are ever read from or written to the cache.
    pub fn is_cacheable_method(method: &Method) -> bool {
        *method == Method::GET
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// == Query Normalization ==
/// Drops empty segments and stably sorts the rest by parameter name.
fn normalize_query(query: &str) -> String {
    let mut pairs: Vec<&str> = query.split('&').filter(|s| !s.is_empty()).collect();
    pairs.sort_by(|a, b| param_name(a).cmp(param_name(b)));
    pairs.join("&")
}

fn param_name(pair: &str) -> &str {
    pair.split_once('=').map(|(name, _)| name).unwrap_or(pair)
}
