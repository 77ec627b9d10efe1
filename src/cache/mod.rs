//! Cache Module
//!
//! Response caching for idempotent read endpoints: key derivation, TTL
//! entries, the shared store, the `wrap` decorator and the axum middleware.

mod clock;
mod entry;
mod key;
mod middleware;
mod response;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::ResponseEntry;
pub use key::CacheKey;
pub use middleware::{cache_response, CachedRoute};
pub use response::{CachedHandler, RequestInfo, ResponseCache};
pub use stats::CacheStats;
pub use store::ResponseStore;

// == Public Constants ==
/// Default TTL in seconds for cached responses
pub const DEFAULT_CACHE_DURATION: u64 = 300;

/// Largest response body the middleware will buffer and store
pub const MAX_BODY_BYTES: usize = 1024 * 1024; // 1 MB
