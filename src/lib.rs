//! Diagram Render Cache - A diagram rendering tool server
//!
//! Renders diagram source through an external renderer, with a bounded,
//! content-addressed LRU cache in front of it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod renderer;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, ServiceError};
pub use service::{RenderOutcome, RenderService};
pub use tasks::spawn_prune_task;
