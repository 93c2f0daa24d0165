//! Render Service
//!
//! Request handling logic for the render tool: derives the cache key, serves
//! fresh cached results and otherwise calls the renderer and stores the
//! result.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{
    create_cache_entry, generate_key, is_entry_valid, CacheKey, CacheStats, DebugEntry,
    RenderCache, RenderOutput, SharedCache,
};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::models::RenderRequest;
use crate::renderer::Renderer;

/// Result of a render call.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Cache key derived from the normalized request
    pub key: CacheKey,
    pub output: RenderOutput,
    /// True if `output` was served from the cache
    pub cached: bool,
}

/// Render path shared by all handlers.
///
/// Caching is optional: with `cache == None` every request goes straight to
/// the renderer.
#[derive(Clone)]
pub struct RenderService {
    cache: Option<SharedCache>,
    renderer: Arc<dyn Renderer>,
    max_age_ms: u64,
}

impl RenderService {
    /// Creates a new service.
    pub fn new(cache: Option<RenderCache>, renderer: Arc<dyn Renderer>, max_age_ms: u64) -> Self {
        Self {
            cache: cache.map(|c| Arc::new(RwLock::new(c))),
            renderer,
            max_age_ms,
        }
    }

    /// Builds the service from configuration.
    ///
    /// The cache is only constructed when `cache_enabled` is set.
    pub fn from_config(config: &Config, renderer: Arc<dyn Renderer>) -> Result<Self> {
        config.validate()?;
        let cache = if config.cache_enabled {
            Some(RenderCache::with_memory_mb(
                config.max_entries,
                config.max_memory_mb,
            )?)
        } else {
            None
        };
        Ok(Self::new(cache, renderer, config.max_age_ms))
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Returns the shared cache handle, if caching is enabled.
    pub fn cache(&self) -> Option<&SharedCache> {
        self.cache.as_ref()
    }

    /// Freshness window applied on the render path.
    pub fn max_age_ms(&self) -> u64 {
        self.max_age_ms
    }

    // == Render ==
    /// Renders a diagram, serving a fresh cached result when one exists.
    ///
    /// The renderer is called without holding the cache lock. A failed render
    /// leaves the cache untouched.
    pub async fn render(&self, request: &RenderRequest) -> Result<RenderOutcome> {
        if let Some(msg) = request.validate() {
            return Err(ServiceError::InvalidRequest(msg));
        }

        let request = request.normalized();
        let key = generate_key(
            &request.source_code,
            &request.diagram_format,
            &request.output_format,
        );

        let Some(cache) = &self.cache else {
            let output = self.renderer.render(&request).await?;
            return Ok(RenderOutcome {
                key,
                output,
                cached: false,
            });
        };

        let hit = {
            let mut guard = cache.write().await;
            match guard.get(&key) {
                Some(entry) if is_entry_valid(entry, self.max_age_ms) => {
                    Some(entry.output().clone())
                }
                Some(_) => {
                    debug!("Cached render {} is stale, re-rendering", key);
                    None
                }
                None => None,
            }
        };

        if let Some(output) = hit {
            debug!("Serving {} from cache", key);
            return Ok(RenderOutcome {
                key,
                output,
                cached: true,
            });
        }

        let output = self.renderer.render(&request).await?;
        info!(
            "Rendered {} -> {} ({} bytes), caching as {}",
            request.diagram_format,
            request.output_format,
            output.len(),
            key
        );

        cache
            .write()
            .await
            .set(key.clone(), create_cache_entry(output.clone()));

        Ok(RenderOutcome {
            key,
            output,
            cached: false,
        })
    }

    // == Administration ==
    fn require_cache(&self) -> Result<&SharedCache> {
        self.cache.as_ref().ok_or(ServiceError::CacheDisabled)
    }

    /// Returns cache statistics, or None when caching is disabled.
    pub async fn stats(&self) -> Option<CacheStats> {
        match &self.cache {
            Some(cache) => Some(cache.read().await.stats()),
            None => None,
        }
    }

    /// Lists cached entries from most to least recently used.
    pub async fn debug_info(&self) -> Result<Vec<DebugEntry>> {
        Ok(self.require_cache()?.read().await.debug_info())
    }

    /// Prunes entries older than `max_age_ms`, or the configured max-age.
    ///
    /// Returns the number removed and the max-age that was applied.
    pub async fn prune_expired(&self, max_age_ms: Option<u64>) -> Result<(usize, u64)> {
        let max_age_ms = max_age_ms.unwrap_or(self.max_age_ms);
        let removed = self.require_cache()?.write().await.prune_expired(max_age_ms);
        if removed > 0 {
            info!("Pruned {} cached renders older than {}ms", removed, max_age_ms);
        }
        Ok((removed, max_age_ms))
    }

    /// Drops every cached render.
    pub async fn clear(&self) -> Result<()> {
        self.require_cache()?.write().await.clear();
        info!("Render cache cleared");
        Ok(())
    }
}
