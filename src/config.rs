//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::{DEFAULT_CACHE_DURATION, MAX_BODY_BYTES};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Response cache TTL in seconds
    pub cache_duration: u64,
    /// Directory holding the JSON data files
    pub data_dir: PathBuf,
    /// Background sweep interval in seconds, 0 disables the sweep
    pub cleanup_interval: u64,
    /// Largest response body the cache will store
    pub max_body_bytes: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_DURATION` - Response cache TTL in seconds (default: 300)
    /// - `DATA_DIR` - JSON data directory (default: `data`)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `MAX_BODY_BYTES` - Largest cacheable body (default: 1 MiB)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_duration: parse_var("CACHE_DURATION").unwrap_or(defaults.cache_duration),
            data_dir: env::var("DATA_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            max_body_bytes: parse_var("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_duration: DEFAULT_CACHE_DURATION,
            data_dir: PathBuf::from("data"),
            cleanup_interval: 60,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_duration, 300);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.cleanup_interval, 60);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the environment to avoid races between tests
        env::remove_var("SERVER_PORT");
        env::remove_var("DATA_DIR");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("MAX_BODY_BYTES");
        env::set_var("CACHE_DURATION", "not-a-number");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_duration, 300);
        assert_eq!(config.data_dir, PathBuf::from("data"));

        env::set_var("CACHE_DURATION", " 5 ");
        env::set_var("DATA_DIR", "/srv/ott");
        let config = Config::from_env();
        assert_eq!(config.cache_duration, 5);
        assert_eq!(config.data_dir, PathBuf::from("/srv/ott"));

        env::remove_var("CACHE_DURATION");
        env::remove_var("DATA_DIR");
    }
}
