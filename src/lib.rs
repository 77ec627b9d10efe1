//! OTT Cache - caching layer for a simulated OTT data service
//!
//! A TTL response cache for idempotent read endpoints and a read-through
//! cache over slow data files, invalidated by their modification time.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod tasks;

pub use api::{create_router, AppState};
pub use cache::{CachedHandler, RequestInfo, ResponseCache};
pub use config::Config;
pub use error::{ApiError, SourceReadError};
pub use source::{JsonFileLoader, SourceCache, SourceLoader};
pub use tasks::spawn_cleanup_task;
