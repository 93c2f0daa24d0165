//! Configuration Module
//!
//! Handles loading and validating server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::error::{Result, ServiceError};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether render results are cached at all
    pub cache_enabled: bool,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Maximum memory the cached payloads may occupy, in megabytes
    pub max_memory_mb: usize,
    /// Age in milliseconds after which a cached render is re-rendered
    pub max_age_ms: u64,
    /// Background prune interval in seconds, 0 disables the task
    pub prune_interval: u64,
    /// Base URL of the external renderer
    pub renderer_url: String,
    /// Renderer request timeout in seconds
    pub render_timeout: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ENABLED` - Enable the render cache (default: true)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 100)
    /// - `CACHE_MAX_MEMORY_MB` - Maximum cache memory in MB (default: 50)
    /// - `CACHE_MAX_AGE_MS` - Freshness window in milliseconds (default: 3600000)
    /// - `PRUNE_INTERVAL` - Prune frequency in seconds, 0 = off (default: 300)
    /// - `RENDERER_URL` - Renderer base URL (default: https://kroki.io)
    /// - `RENDER_TIMEOUT` - Renderer timeout in seconds (default: 30)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_enabled: env::var("CACHE_ENABLED")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.cache_enabled),
            max_entries: env_or("CACHE_MAX_ENTRIES", defaults.max_entries),
            max_memory_mb: env_or("CACHE_MAX_MEMORY_MB", defaults.max_memory_mb),
            max_age_ms: env_or("CACHE_MAX_AGE_MS", defaults.max_age_ms),
            prune_interval: env_or("PRUNE_INTERVAL", defaults.prune_interval),
            renderer_url: env::var("RENDERER_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.renderer_url),
            render_timeout: env_or("RENDER_TIMEOUT", defaults.render_timeout),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Rejects settings that would make the service unusable.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries < 1 {
            return Err(ServiceError::InvalidConfig(
                "CACHE_MAX_ENTRIES must be at least 1".to_string(),
            ));
        }
        if self.max_memory_mb < 1 {
            return Err(ServiceError::InvalidConfig(
                "CACHE_MAX_MEMORY_MB must be at least 1".to_string(),
            ));
        }
        if self.render_timeout < 1 {
            return Err(ServiceError::InvalidConfig(
                "RENDER_TIMEOUT must be at least 1".to_string(),
            ));
        }
        if !(self.renderer_url.starts_with("http://") || self.renderer_url.starts_with("https://"))
        {
            return Err(ServiceError::InvalidConfig(format!(
                "RENDERER_URL must be an http(s) URL, got '{}'",
                self.renderer_url
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            max_entries: 100,
            max_memory_mb: 50,
            max_age_ms: 3_600_000,
            prune_interval: 300,
            renderer_url: "https://kroki.io".to_string(),
            render_timeout: 30,
            server_port: 3000,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
