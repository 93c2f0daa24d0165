//! API Module
//!
//! HTTP handlers and routing for the render service REST API.
//!
//! # Endpoints
//! - `POST /render` - Render diagram source (cached)
//! - `GET /stats` - Get cache statistics
//! - `GET /cache/debug` - List cached entries
//! - `POST /cache/prune` - Remove stale entries
//! - `DELETE /cache` - Clear the cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
