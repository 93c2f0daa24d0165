//! Renderer Module
//!
//! The external rendering service the cache sits in front of.
//!
//! # Implementations
//! - `KrokiRenderer`: posts diagram source to a Kroki-compatible HTTP service

mod kroki;

use async_trait::async_trait;

use crate::cache::RenderOutput;
use crate::error::Result;
use crate::models::RenderRequest;

pub use kroki::{content_type_for, KrokiRenderer};

/// Turns diagram source into an image.
///
/// Implementations are called outside any cache lock and may take as long as
/// their own timeout allows.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Renders `request`, returning the payload and its content type.
    async fn render(&self, request: &RenderRequest) -> Result<RenderOutput>;
}
