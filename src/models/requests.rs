//! Request DTOs for the OTT API
//!
//! Query strings accepted by the read and admin endpoints.

use serde::Deserialize;

/// Query for the asset endpoint (GET /apa/asset)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetQuery {
    /// Device type the configuration is looked up for
    #[serde(default)]
    pub device_type: Option<String>,
}

impl AssetQuery {
    /// Validates the query
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match self.device_type.as_deref().map(str::trim) {
            None | Some("") => Some("device_type is required".to_string()),
            Some(_) => None,
        }
    }
}

/// Query for the cache clear endpoint (DELETE /cache)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearCacheQuery {
    /// Cache key to remove; the whole cache is cleared when absent
    #[serde(default)]
    pub key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_query_deserialize() {
        let json = r#"{"device_type": "ptv"}"#;
        let query: AssetQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.device_type.as_deref(), Some("ptv"));
        assert!(query.validate().is_none());
    }

    #[test]
    fn test_asset_query_missing_device_type() {
        let query: AssetQuery = serde_json::from_str("{}").unwrap();
        assert!(query.validate().is_some());
    }

    #[test]
    fn test_asset_query_blank_device_type() {
        let query = AssetQuery {
            device_type: Some("  ".to_string()),
        };
        assert!(query.validate().is_some());
    }

    #[test]
    fn test_clear_query_without_key() {
        let query: ClearCacheQuery = serde_json::from_str("{}").unwrap();
        assert!(query.key.is_none());
    }
}
