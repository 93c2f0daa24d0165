//! API Handlers
//!
//! HTTP request handlers for each render service endpoint.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};

use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::models::{
    ClearResponse, DebugResponse, HealthResponse, PruneRequest, PruneResponse, RenderRequest,
    RenderResponse, StatsResponse,
};
use crate::renderer::{KrokiRenderer, Renderer};
use crate::service::RenderService;

/// Application state shared across all handlers.
///
/// Wraps the render service, which owns the shared cache handle.
#[derive(Clone)]
pub struct AppState {
    pub service: RenderService,
}

impl AppState {
    /// Creates a new AppState around an existing service.
    pub fn new(service: RenderService) -> Self {
        Self { service }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the HTTP renderer and, if enabled, the render cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        let renderer: Arc<dyn Renderer> = Arc::new(KrokiRenderer::new(
            config.renderer_url.clone(),
            std::time::Duration::from_secs(config.render_timeout),
        )?);
        Ok(Self::new(RenderService::from_config(config, renderer)?))
    }
}

/// Handler for POST /render
///
/// Renders diagram source, serving a fresh cached result when available.
pub async fn render_handler(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<RenderResponse>> {
    let outcome = state.service.render(&req).await?;
    Ok(Json(RenderResponse::from(outcome)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        cache_enabled: state.service.cache_enabled(),
        cache: state.service.stats().await,
    })
}

/// Handler for GET /cache/debug
///
/// Lists cached entries from most to least recently used.
pub async fn debug_handler(State(state): State<AppState>) -> Result<Json<DebugResponse>> {
    let entries = state.service.debug_info().await?;
    Ok(Json(DebugResponse { entries }))
}

/// Handler for POST /cache/prune
///
/// Removes entries older than the given (or configured) max-age.
/// An empty body selects the configured max-age; anything else must be a
/// valid `PruneRequest`.
pub async fn prune_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PruneResponse>> {
    let req = parse_prune_request(&body)?;
    let (removed, max_age_ms) = state.service.prune_expired(req.max_age_ms).await?;
    Ok(Json(PruneResponse {
        removed,
        max_age_ms,
    }))
}

fn parse_prune_request(body: &[u8]) -> Result<PruneRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(PruneRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ServiceError::InvalidRequest(format!("malformed prune body: {}", e)))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    state.service.clear().await?;
    Ok(Json(ClearResponse::new()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.service.cache_enabled()))
}
