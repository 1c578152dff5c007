//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::CacheService;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, InvalidateResponse, SetRequest, SetResponse,
    StatsResponse,
};

/// Application state shared across all handlers.
///
/// Holds the cache service behind an Arc; the service's interior state
/// (fallback lock, metrics atomics) makes the handle cheaply shareable.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache service
    pub cache: Arc<CacheService>,
}

impl AppState {
    /// Creates a new AppState wrapping the given cache service.
    pub fn new(cache: CacheService) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Probes the networked tier once during construction.
    pub async fn from_config(config: &Config) -> Self {
        Self::new(CacheService::from_config(config).await)
    }
}

/// Folds query parameters into the pair slice the cache service expects.
fn query_pairs(query: &BTreeMap<String, String>) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Handler for PUT /cache
///
/// Caches a value under (category, identifier) with the category's policy.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let cached = state
        .cache
        .set(
            &req.category,
            &req.identifier,
            &req.value,
            req.ttl,
            &req.param_pairs(),
        )
        .await?;

    Ok(Json(SetResponse::new(&req.category, &req.identifier, cached)))
}

/// Handler for GET /cache/:category/:identifier
///
/// Looks up a cached value; query parameters become key parameters.
pub async fn get_handler(
    State(state): State<AppState>,
    Path((category, identifier)): Path<(String, String)>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Json<GetResponse>> {
    let params = query_pairs(&query);
    let value: Option<Value> = state.cache.get(&category, &identifier, &params).await?;

    match value {
        Some(value) => Ok(Json(GetResponse::new(category, identifier, value))),
        None => Err(CacheError::NotFound(format!("{}:{}", category, identifier))),
    }
}

/// Handler for DELETE /cache/:category/:identifier
///
/// Removes a single entry from both tiers.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path((category, identifier)): Path<(String, String)>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Json<DeleteResponse>> {
    let params = query_pairs(&query);
    let removed = state.cache.delete(&category, &identifier, &params).await?;

    Ok(Json(DeleteResponse::new(removed)))
}

/// Handler for POST /invalidate/:category
///
/// Removes every entry of one category.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    let removed = state.cache.invalidate_category(&category).await?;

    Ok(Json(InvalidateResponse::new(category, removed)))
}

/// Handler for GET /stats
///
/// Returns current cache effectiveness metrics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.metrics_snapshot()))
}

/// Handler for GET /health
///
/// Returns tier connectivity and cache effectiveness.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::from(state.cache.health_check().await))
}
