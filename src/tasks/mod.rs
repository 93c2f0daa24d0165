//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Prune: Removes cached renders older than the configured max-age

mod prune;

pub use prune::spawn_prune_task;
