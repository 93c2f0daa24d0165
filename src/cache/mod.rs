//! Cache Module
//!
//! Provides the bounded, content-addressed render result cache: key
//! derivation, LRU storage with entry-count and memory limits, staleness
//! checks, statistics and pruning.

mod entry;
mod key;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::{
    create_cache_entry, current_timestamp_ms, is_entry_valid, is_entry_valid_at, CacheEntry,
    RenderOutput,
};
pub use key::{generate_key, CacheKey, KEY_LENGTH};
pub use lru::LruMap;
pub use stats::{CacheCounters, CacheStats, DebugEntry};
pub use store::{RenderCache, BYTES_PER_MB};

/// Cache handle shared between request handlers and background tasks.
pub type SharedCache = std::sync::Arc<tokio::sync::RwLock<RenderCache>>;
