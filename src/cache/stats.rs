//! Cache Statistics Module
//!
//! Tracks lifetime hit/miss/eviction counters and defines the diagnostic
//! views handed out by the store.

use serde::Serialize;

use crate::cache::CacheKey;

// == Cache Counters ==
/// Lifetime performance counters.
///
/// Counters survive `clear()`; they describe the cache's whole lifetime, not
/// its current contents.
#[derive(Debug, Clone, Default)]
pub struct CacheCounters {
    /// Number of lookups that found an entry
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Number of entries evicted due to capacity pressure
    pub evictions: u64,
}

impl CacheCounters {
    // == Constructor ==
    /// Creates a new set of counters, all at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

// == Cache Stats ==
/// Point-in-time view of the cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Current number of entries
    pub size: usize,
    /// hits / (hits + misses), 0.0 before the first lookup
    pub hit_rate: f64,
    /// Sum of `size_bytes` over all present entries
    pub memory_usage_bytes: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub max_entries: usize,
    pub max_memory_bytes: usize,
}

// == Debug Entry ==
/// One line of the debug listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugEntry {
    pub key: CacheKey,
    pub age_ms: u64,
    pub size_bytes: usize,
    pub content_type: String,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_new() {
        let counters = CacheCounters::new();
        assert_eq!(counters.hits, 0);
        assert_eq!(counters.misses, 0);
        assert_eq!(counters.evictions, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let counters = CacheCounters::new();
        assert_eq!(counters.hit_rate(), 0.0);
        assert!(!counters.hit_rate().is_nan());
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut counters = CacheCounters::new();
        counters.record_hit();
        counters.record_hit();
        assert_eq!(counters.hit_rate(), 1.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut counters = CacheCounters::new();
        counters.record_hit();
        counters.record_miss();
        counters.record_miss();
        counters.record_miss();
        assert_eq!(counters.hit_rate(), 0.25);
    }

    #[test]
    fn test_record_eviction() {
        let mut counters = CacheCounters::new();
        counters.record_eviction();
        counters.record_eviction();
        assert_eq!(counters.evictions, 2);
    }
}
