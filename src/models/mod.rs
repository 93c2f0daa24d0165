//! Request and Response models for the render service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{PruneRequest, RenderRequest, MAX_FORMAT_LENGTH, MAX_SOURCE_LENGTH};
pub use responses::{
    ClearResponse, DebugResponse, ErrorResponse, HealthResponse, PruneResponse, RenderResponse,
    StatsResponse,
};
