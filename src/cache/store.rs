//! Cache Store Module
//!
//! Main cache engine combining the LRU map with capacity enforcement,
//! statistics and explicit pruning.

use tracing::{debug, warn};

use crate::cache::{
    current_timestamp_ms, is_entry_valid_at, CacheCounters, CacheEntry, CacheKey, CacheStats,
    DebugEntry, LruMap,
};
use crate::error::{Result, ServiceError};

/// Bytes per megabyte as used by the memory limit.
pub const BYTES_PER_MB: usize = 1024 * 1024;

// == Render Cache ==
/// Bounded store for render results.
///
/// After every `set` the cache holds at most `max_entries` entries and at most
/// `max_memory_bytes` of payload. The single exception is an entry that on its
/// own is larger than `max_memory_bytes`: it evicts everything else and is
/// kept alone.
#[derive(Debug)]
pub struct RenderCache {
    /// Entries in recency order
    entries: LruMap,
    /// Lifetime counters
    counters: CacheCounters,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Maximum sum of `size_bytes` allowed
    max_memory_bytes: usize,
}

impl RenderCache {
    // == Constructor ==
    /// Creates a new cache with the given limits.
    ///
    /// # Errors
    /// Fails with `InvalidConfig` if either limit is zero.
    pub fn new(max_entries: usize, max_memory_bytes: usize) -> Result<Self> {
        if max_entries < 1 {
            return Err(ServiceError::InvalidConfig(
                "max_entries must be at least 1".to_string(),
            ));
        }
        if max_memory_bytes < 1 {
            return Err(ServiceError::InvalidConfig(
                "max_memory_bytes must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            entries: LruMap::new(),
            counters: CacheCounters::new(),
            max_entries,
            max_memory_bytes,
        })
    }

    /// Creates a new cache with the memory limit given in megabytes.
    pub fn with_memory_mb(max_entries: usize, max_memory_mb: usize) -> Result<Self> {
        let max_memory_bytes = max_memory_mb.checked_mul(BYTES_PER_MB).ok_or_else(|| {
            ServiceError::InvalidConfig(format!("{} MB does not fit in memory", max_memory_mb))
        })?;
        Self::new(max_entries, max_memory_bytes)
    }

    // == Get ==
    /// Looks up an entry and marks it as most recently used.
    ///
    /// Records a hit or a miss. Staleness is not checked here; callers apply
    /// `is_entry_valid` with whatever max-age they need.
    pub fn get(&mut self, key: &str) -> Option<&CacheEntry> {
        match self.entries.get_refresh(key) {
            Some(entry) => {
                self.counters.record_hit();
                Some(entry)
            }
            None => {
                self.counters.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores an entry at the most recently used position.
    ///
    /// An existing entry under the same key is replaced. Least recently used
    /// entries are evicted until both limits hold again.
    pub fn set(&mut self, key: CacheKey, entry: CacheEntry) {
        if entry.size_bytes() > self.max_memory_bytes {
            warn!(
                "Entry {} ({} bytes) exceeds the cache memory limit of {} bytes; keeping it alone",
                key, entry.size_bytes(), self.max_memory_bytes
            );
        }

        self.entries.insert(key, entry);
        self.enforce_limits();
    }

    // == Enforce Limits ==
    fn enforce_limits(&mut self) {
        while self.entries.len() > self.max_entries
            || self.entries.memory_bytes() > self.max_memory_bytes
        {
            // The newest entry sits at the MRU end; it is only the LRU
            // candidate when it is alone.
            if self.entries.len() <= 1 {
                break;
            }
            match self.entries.pop_lru() {
                Some((evicted_key, evicted)) => {
                    self.counters.record_eviction();
                    debug!(
                        "Evicted {} ({} bytes) from render cache",
                        evicted_key, evicted.size_bytes()
                    );
                }
                None => break,
            }
        }
    }

    // == Remove ==
    /// Removes a single entry. Returns true if it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes all entries.
    ///
    /// Hit, miss and eviction counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Prune Expired ==
    /// Removes every entry older than `max_age_ms`.
    ///
    /// Returns the number of entries removed.
    pub fn prune_expired(&mut self, max_age_ms: u64) -> usize {
        let now = current_timestamp_ms();
        self.entries
            .remove_where(|entry| !is_entry_valid_at(entry, max_age_ms, now))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            hit_rate: self.counters.hit_rate(),
            memory_usage_bytes: self.entries.memory_bytes(),
            hits: self.counters.hits,
            misses: self.counters.misses,
            evictions: self.counters.evictions,
            max_entries: self.max_entries,
            max_memory_bytes: self.max_memory_bytes,
        }
    }

    // == Debug Info ==
    /// Lists every entry from most to least recently used.
    ///
    /// Does not change recency or counters.
    pub fn debug_info(&self) -> Vec<DebugEntry> {
        let now = current_timestamp_ms();
        self.entries
            .iter_mru()
            .map(|(key, entry)| DebugEntry {
                key: key.clone(),
                age_ms: entry.age_ms_at(now),
                size_bytes: entry.size_bytes(),
                content_type: entry.output().content_type.clone(),
            })
            .collect()
    }

    // == Contains ==
    /// Checks presence without counting a lookup or touching recency.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn max_memory_bytes(&self) -> usize {
        self.max_memory_bytes
    }
}
