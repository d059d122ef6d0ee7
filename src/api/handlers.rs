//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::cache::{ExpiringCache, SharedCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GenerateRequest, GenerateResponse, GetResponse, HealthResponse, PurgeResponse,
    SetRequest, SetResponse, StatsResponse,
};
use crate::variants::VariantService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Generic JSON entries behind `/cache`
    pub cache: SharedCache<Value>,
    /// Variant generation backed by its own cache
    pub variants: Arc<VariantService>,
    /// TTL for entries stored without one
    pub default_ttl: Duration,
}

impl AppState {
    pub fn new(
        cache: SharedCache<Value>,
        variants: VariantService,
        default_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            variants: Arc::new(variants),
            default_ttl,
        }
    }

    /// Builds both caches and the variant service from configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = ExpiringCache::new(config.cache_config()).into_shared();
        let variant_cache = ExpiringCache::new(config.cache_config()).into_shared();
        let variants = VariantService::new(variant_cache, config.variant_ttl());
        Self::new(cache, variants, config.default_ttl())
    }
}

/// Handler for PUT /cache
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidArgument(error_msg));
    }

    let ttl = req.ttl(state.default_ttl);
    state.cache.write().await.set(req.key.clone(), req.value, ttl)?;

    Ok(Json(SetResponse::new(req.key, ttl.as_millis() as u64)))
}

/// Handler for GET /cache/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a stale read evicts.
    let mut cache = state.cache.write().await;
    let value = cache
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;
    let ttl_remaining = cache.ttl_remaining(&key).map(|d| d.as_millis() as u64);

    Ok(Json(GetResponse::new(key, value, ttl_remaining)))
}

/// Handler for DELETE /cache/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let removed = state.cache.write().await.delete(&key);
    Json(DeleteResponse::new(key, removed))
}

/// Handler for DELETE /cache
///
/// Drops every generic entry. Variants are left alone.
pub async fn clear_handler(State(state): State<AppState>) -> Json<PurgeResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.len();
    cache.clear();

    info!("Cache cleared: {} entries removed", removed);
    Json(PurgeResponse { removed })
}

/// Handler for POST /cache/sweep
///
/// Purges stale entries from both caches right away.
pub async fn sweep_handler(State(state): State<AppState>) -> Json<PurgeResponse> {
    let removed = state.cache.write().await.purge_expired()
        + state.variants.cache().write().await.purge_expired();

    Json(PurgeResponse { removed })
}

/// Handler for POST /variants
pub async fn generate_handler(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    let generated = state
        .variants
        .generate(&req.template_id, &req.product_data)
        .await?;

    Ok(Json(GenerateResponse {
        cached: generated.cached,
        variants: generated.variants.as_ref().clone(),
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let entries = state.cache.read().await.stats();
    let variants = state.variants.cache().read().await.stats();

    Json(StatsResponse {
        entries: entries.into(),
        variants: variants.into(),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::ProductData;
    use serde_json::json;

    fn state() -> AppState {
        AppState::from_config(&Config::default())
    }

    fn set_request(key: &str, value: Value, ttl_ms: Option<i64>) -> Json<SetRequest> {
        Json(SetRequest {
            key: key.to_string(),
            value,
            ttl_ms,
        })
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = state();

        let set = set_handler(
            State(state.clone()),
            set_request("test_key", json!({"a": 1}), None),
        )
        .await
        .unwrap();
        assert_eq!(set.ttl_ms, 300_000);

        let response = get_handler(State(state), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!({"a": 1}));
        assert!(response.ttl_remaining_ms.is_some());
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let result = get_handler(State(state()), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_zero_ttl_is_never_served() {
        let state = state();

        set_handler(State(state.clone()), set_request("k", json!("v"), Some(0)))
            .await
            .unwrap();

        let result = get_handler(State(state), Path("k".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = state();
        set_handler(State(state.clone()), set_request("to_delete", json!(1), None))
            .await
            .unwrap();

        let first = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        let second = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;

        assert!(first.removed);
        assert!(!second.removed);
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let state = state();
        for key in ["a", "b"] {
            set_handler(State(state.clone()), set_request(key, json!(key), None))
                .await
                .unwrap();
        }

        let response = clear_handler(State(state.clone())).await;

        assert_eq!(response.removed, 2);
        assert!(state.cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let result = set_handler(State(state()), set_request("", json!(1), None)).await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_generate_handler_caches() {
        let state = state();
        let request = || {
            Json(GenerateRequest {
                template_id: "BoldRed".to_string(),
                product_data: ProductData::named("Acme"),
            })
        };

        let first = generate_handler(State(state.clone()), request()).await.unwrap();
        let second = generate_handler(State(state.clone()), request()).await.unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.variants, second.variants);

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.variants.stats.hits, 1);
        assert_eq!(stats.variants.stats.total_entries, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
