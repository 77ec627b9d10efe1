//! Request and Response models for the OTT API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query strings and serializing admin responses.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{AssetQuery, ClearCacheQuery};
pub use responses::{ClearCacheResponse, HealthResponse, StatsResponse};
