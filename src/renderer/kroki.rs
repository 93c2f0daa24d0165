//! Kroki Renderer
//!
//! HTTP client for Kroki-style rendering services:
//! `POST {base_url}/{diagram_format}/{output_format}` with the source as body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::{debug, warn};

use super::Renderer;
use crate::cache::RenderOutput;
use crate::error::{Result, ServiceError};
use crate::models::RenderRequest;

/// Longest slice of an error body copied into the returned error.
const ERROR_BODY_EXCERPT: usize = 200;

// == Kroki Renderer ==
/// Renderer backed by a Kroki-compatible HTTP endpoint.
#[derive(Debug, Clone)]
pub struct KrokiRenderer {
    base_url: String,
    client: Client,
}

impl KrokiRenderer {
    /// Creates a renderer for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("diagram_render_cache/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Returns the endpoint a request is posted to.
    pub fn endpoint(&self, request: &RenderRequest) -> String {
        format!(
            "{}/{}/{}",
            self.base_url, request.diagram_format, request.output_format
        )
    }
}

#[async_trait]
impl Renderer for KrokiRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<RenderOutput> {
        let url = self.endpoint(request);
        debug!("Rendering {} bytes of source via {}", request.source_code.len(), url);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(request.source_code.clone())
            .send()
            .await
            .map_err(|e| ServiceError::Render(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(ERROR_BODY_EXCERPT).collect();
            warn!("Renderer returned {} for {}", status, url);
            return Err(ServiceError::Render(format!(
                "renderer returned HTTP {}: {}",
                status.as_u16(),
                excerpt.trim()
            )));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Render(format!("reading response failed: {}", e)))?;

        Ok(RenderOutput::new(
            data.to_vec(),
            content_type.unwrap_or_else(|| content_type_for(&request.output_format).to_string()),
        ))
    }
}

/// Fallback MIME type for an output format when the renderer sends none.
pub fn content_type_for(output_format: &str) -> &'static str {
    match output_format {
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "pdf" => "application/pdf",
        "jpeg" | "jpg" => "image/jpeg",
        "txt" | "utxt" => "text/plain",
        _ => "application/octet-stream",
    }
}
