//! Response DTOs for the render service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use crate::cache::{CacheStats, DebugEntry};
use crate::service::RenderOutcome;

/// Response body for the render tool (POST /render)
#[derive(Debug, Clone, Serialize)]
pub struct RenderResponse {
    /// Content-addressed key of this render
    pub cache_key: String,
    /// MIME type of the payload
    pub content_type: String,
    /// Payload length in bytes
    pub size_bytes: usize,
    /// True if the result came from the cache
    pub cached: bool,
    /// Payload, standard base64
    pub data: String,
}

impl From<RenderOutcome> for RenderResponse {
    fn from(outcome: RenderOutcome) -> Self {
        Self {
            cache_key: outcome.key,
            size_bytes: outcome.output.len(),
            data: STANDARD.encode(&outcome.output.data),
            content_type: outcome.output.content_type,
            cached: outcome.cached,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub cache_enabled: bool,
    /// Absent when caching is disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStats>,
}

/// Response body for GET /cache/debug
#[derive(Debug, Clone, Serialize)]
pub struct DebugResponse {
    /// Entries from most to least recently used
    pub entries: Vec<DebugEntry>,
}

/// Response body for POST /cache/prune
#[derive(Debug, Clone, Serialize)]
pub struct PruneResponse {
    pub removed: usize,
    pub max_age_ms: u64,
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn new() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

impl Default for ClearResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    pub cache_enabled: bool,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache_enabled: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            cache_enabled,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
