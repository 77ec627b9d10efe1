//! API Handlers
//!
//! HTTP request handlers for the simulated OTT read endpoints and the cache
//! administration endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{AssetQuery, ClearCacheQuery, ClearCacheResponse, HealthResponse, StatsResponse};
use crate::source::{JsonFileLoader, JsonSourceCache};

// == Data Files ==
pub const NAVIGATION_SOURCE: &str = "db.json";
pub const ASSETS_SOURCE: &str = "assets.json";
pub const METADATA_SOURCE: &str = "metadata.json";

/// Parameters the metadata endpoint always returns, `null` when absent.
pub const METADATA_PARAMS: &[&str] = &[
    "translations",
    "sprites_configuration",
    "atv_hide_pack_logo",
    "third_party_epg_apps",
    "logs_dashboard_url",
    "lms_bootstrap_url",
    "byr_filterlist_configuration",
    "time_to_get_favs",
    "sentinel_reminders_interval",
    "pin_use_channel_rating_flow",
    "time_to_get_recordings",
    "onboarding",
    "interval_time_check_epg_version",
    "interval_time_check_lineal_channels",
    "fast_forward_rewind_option",
    "supported_stream",
    "isloggedin_refresh_hours_time",
    "atv_max_buffer_ms",
    "atv_min_buffer_ms",
    "atv_rebuffer_ms",
    "atv_start_buffer_ms",
    "myaccount_configuration",
    "fallback_interval_time",
];

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Response cache applied to the read endpoints
    pub cache: ResponseCache,
    /// Read-through cache over the JSON data directory
    pub sources: Arc<JsonSourceCache>,
    /// Largest response body the cache will store
    pub max_body_bytes: usize,
}

impl AppState {
    /// Creates a new AppState from its two caches.
    pub fn new(cache: ResponseCache, sources: JsonSourceCache) -> Self {
        Self {
            cache,
            sources: Arc::new(sources),
            max_body_bytes: crate::cache::MAX_BODY_BYTES,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = ResponseCache::new(config.cache_duration);
        let sources = JsonSourceCache::new(JsonFileLoader::new(&config.data_dir));
        Self {
            max_body_bytes: config.max_body_bytes,
            ..Self::new(cache, sources)
        }
    }

    /// Reads a data file through the source cache off the async runtime.
    pub async fn read_source(&self, source_id: &'static str) -> Result<Arc<Value>> {
        let sources = Arc::clone(&self.sources);
        let data = tokio::task::spawn_blocking(move || sources.read(source_id))
            .await
            .map_err(|e| ApiError::Internal(format!("Source read task failed: {}", e)))??;
        Ok(data)
    }
}

/// Handler for GET /nav/data
///
/// Returns the navigation tree stored under `navigation` in `db.json`.
pub async fn nav_data_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let db = state.read_source(NAVIGATION_SOURCE).await?;

    match db.get("navigation") {
        Some(navigation) if !navigation.is_null() => Ok(Json(navigation.clone())),
        _ => Err(ApiError::NotFound("Navigation data not found".to_string())),
    }
}

/// Handler for GET /apa/asset
///
/// Returns the `config` object of the asset matching `device_type`, falling
/// back to the asset with id `default`.
pub async fn asset_handler(
    State(state): State<AppState>,
    Query(query): Query<AssetQuery>,
) -> Result<Json<Value>> {
    if let Some(error_msg) = query.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }
    let device_type = query.device_type.as_deref().unwrap_or_default().trim();

    let data = state.read_source(ASSETS_SOURCE).await?;
    let asset = find_asset(&data, device_type)
        .ok_or_else(|| ApiError::NotFound("Asset configuration not found".to_string()))?;

    debug!(device_type, "asset configuration resolved");
    let config = asset
        .get("config")
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));
    Ok(Json(config))
}

/// Handler for GET /apa/metadata
///
/// Projects `metadata.json` onto [`METADATA_PARAMS`].
pub async fn metadata_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let metadata = state.read_source(METADATA_SOURCE).await?;
    Ok(Json(project_metadata(&metadata)))
}

/// Handler for DELETE /cache
///
/// Clears one response cache entry when `key` is given, otherwise all of them.
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    Query(query): Query<ClearCacheQuery>,
) -> Json<ClearCacheResponse> {
    let removed = state.cache.clear(query.key.as_deref()).await;
    Json(ClearCacheResponse::new(query.key, removed))
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    Json(StatsResponse::new(stats, state.sources.len()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// == Helpers ==
fn find_asset<'a>(data: &'a Value, device_type: &str) -> Option<&'a Value> {
    let assets = data.get("assets")?.as_array()?;
    assets
        .iter()
        .find(|asset| asset.get("deviceType").and_then(Value::as_str) == Some(device_type))
        .or_else(|| {
            assets
                .iter()
                .find(|asset| asset.get("id").and_then(Value::as_str) == Some("default"))
        })
}

fn project_metadata(metadata: &Value) -> Value {
    let projected: Map<String, Value> = METADATA_PARAMS
        .iter()
        .map(|param| {
            let value = metadata.get(*param).cloned().unwrap_or(Value::Null);
            (param.to_string(), value)
        })
        .collect();
    Value::Object(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn state_with(files: &[(&str, Value)]) -> (AppState, TempDir) {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            fs::write(dir.path().join(name), contents.to_string()).unwrap();
        }
        let state = AppState::new(
            ResponseCache::new(300),
            JsonSourceCache::new(JsonFileLoader::new(dir.path())),
        );
        (state, dir)
    }

    fn assets() -> Value {
        json!({
            "assets": [
                { "id": "default", "config": { "quality": "sd" } },
                { "id": "stb-1", "deviceType": "ptv", "config": { "quality": "hd" } }
            ]
        })
    }

    #[tokio::test]
    async fn test_nav_data_handler() {
        let (state, _dir) = state_with(&[(
            "db.json",
            json!({ "navigation": [{ "id": "home", "title": "Home" }], "users": [] }),
        )]);

        let Json(body) = nav_data_handler(State(state)).await.unwrap();
        assert_eq!(body, json!([{ "id": "home", "title": "Home" }]));
    }

    #[tokio::test]
    async fn test_nav_data_missing_is_not_found() {
        let (state, _dir) = state_with(&[("db.json", json!({ "users": [] }))]);

        let result = nav_data_handler(State(state)).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_nav_data_missing_file_is_source_error() {
        let (state, _dir) = state_with(&[]);

        match nav_data_handler(State(state)).await {
            Err(ApiError::Source(err)) => assert_eq!(err.source_id, "db.json"),
            other => panic!("expected source error, got {:?}", other.map(|j| j.0)),
        }
    }

    #[tokio::test]
    async fn test_asset_handler_matches_device_type() {
        let (state, _dir) = state_with(&[("assets.json", assets())]);
        let query = AssetQuery {
            device_type: Some("ptv".to_string()),
        };

        let Json(body) = asset_handler(State(state), Query(query)).await.unwrap();
        assert_eq!(body, json!({ "quality": "hd" }));
    }

    #[tokio::test]
    async fn test_asset_handler_falls_back_to_default() {
        let (state, _dir) = state_with(&[("assets.json", assets())]);
        let query = AssetQuery {
            device_type: Some("web".to_string()),
        };

        let Json(body) = asset_handler(State(state), Query(query)).await.unwrap();
        assert_eq!(body, json!({ "quality": "sd" }));
    }

    #[tokio::test]
    async fn test_asset_handler_requires_device_type() {
        let (state, _dir) = state_with(&[("assets.json", assets())]);

        let result = asset_handler(State(state), Query(AssetQuery::default())).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_asset_handler_without_default_is_not_found() {
        let (state, _dir) = state_with(&[("assets.json", json!({ "assets": [] }))]);
        let query = AssetQuery {
            device_type: Some("ptv".to_string()),
        };

        let result = asset_handler(State(state), Query(query)).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_metadata_handler_fills_missing_with_null() {
        let (state, _dir) = state_with(&[(
            "metadata.json",
            json!({ "time_to_get_favs": 30, "unlisted": true }),
        )]);

        let Json(body) = metadata_handler(State(state)).await.unwrap();
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), METADATA_PARAMS.len());
        assert_eq!(body["time_to_get_favs"], 30);
        assert!(body["onboarding"].is_null());
        assert!(object.get("unlisted").is_none());
    }

    #[tokio::test]
    async fn test_clear_cache_handler() {
        let (state, _dir) = state_with(&[]);
        state
            .cache
            .store("GET:/nav/data".into(), Arc::new(json!([])), 60)
            .await;

        let Json(body) = clear_cache_handler(
            State(state.clone()),
            Query(ClearCacheQuery {
                key: Some("GET:/nav/data".to_string()),
            }),
        )
        .await;
        assert_eq!(body.removed, 1);
        assert!(state.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let (state, _dir) = state_with(&[]);

        let Json(body) = stats_handler(State(state)).await;
        assert_eq!(body.hits, 0);
        assert_eq!(body.misses, 0);
        assert_eq!(body.source_entries, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let Json(body) = health_handler().await;
        assert_eq!(body.status, "healthy");
    }
}
