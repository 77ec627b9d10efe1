//! Source Module
//!
//! Read-through caching of slow data sources with modification-marker
//! invalidation, plus the JSON file loader the service reads its data through.

mod cache;
mod json_file;
mod loader;

pub use cache::SourceCache;
pub use json_file::{JsonFileError, JsonFileLoader};
pub use loader::SourceLoader;

/// Source cache over the service's JSON data directory.
pub type JsonSourceCache = SourceCache<JsonFileLoader>;
