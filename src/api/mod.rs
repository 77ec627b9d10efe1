//! API Module
//!
//! HTTP handlers and routing for the OTT data service.
//!
//! # Endpoints
//! - `GET /nav/data` - Navigation tree
//! - `GET /apa/asset?device_type=` - Asset configuration for a device type
//! - `GET /apa/metadata` - Client metadata parameters
//! - `DELETE /cache` - Clear cached responses
//! - `GET /cache/stats` - Response cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
