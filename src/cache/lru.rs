//! LRU Map Module
//!
//! Keeps cache entries in recency order with running memory accounting.

use linked_hash_map::LinkedHashMap;

use crate::cache::{CacheEntry, CacheKey};

// == LRU Map ==
/// Ordered map from key to entry.
///
/// Entries are kept in a linked hash map where:
/// - Front = Least recently used
/// - Back = Most recently used
///
/// `memory_bytes` always equals the sum of `size_bytes` over the entries in
/// the map; every mutation goes through this type to keep it that way.
#[derive(Debug, Default)]
pub struct LruMap {
    map: LinkedHashMap<CacheKey, CacheEntry>,
    memory_bytes: usize,
}

impl LruMap {
    // == Constructor ==
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self {
            map: LinkedHashMap::new(),
            memory_bytes: 0,
        }
    }

    // == Insert ==
    /// Inserts an entry at the most recently used position.
    ///
    /// Returns the entry previously stored under this key, if any.
    pub fn insert(&mut self, key: CacheKey, entry: CacheEntry) -> Option<CacheEntry> {
        // A replaced key always ends up at the back.
        let replaced = self.remove(&key);
        self.memory_bytes += entry.size_bytes();
        self.map.insert(key, entry);
        replaced
    }

    // == Get Refresh ==
    /// Returns the entry for `key` and marks it as most recently used.
    pub fn get_refresh(&mut self, key: &str) -> Option<&CacheEntry> {
        self.map.get_refresh(key).map(|entry| &*entry)
    }

    // == Remove ==
    /// Removes a key from the map.
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.map.remove(key)?;
        self.memory_bytes -= entry.size_bytes();
        Some(entry)
    }

    // == Pop LRU ==
    /// Returns and removes the least recently used entry.
    ///
    /// Returns None if the map is empty.
    pub fn pop_lru(&mut self) -> Option<(CacheKey, CacheEntry)> {
        let (key, entry) = self.map.pop_front()?;
        self.memory_bytes -= entry.size_bytes();
        Some((key, entry))
    }

    // == Remove Where ==
    /// Removes every entry matching `predicate`, returning how many went.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&CacheEntry) -> bool,
    {
        let doomed: Vec<CacheKey> = self
            .map
            .iter()
            .filter(|&(_, entry)| predicate(entry))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &doomed {
            self.remove(key);
        }
        doomed.len()
    }

    // == Iterate MRU ==
    /// Iterates entries from most to least recently used.
    pub fn iter_mru(&self) -> impl Iterator<Item = (&CacheKey, &CacheEntry)> + '_ {
        self.map.iter().rev()
    }

    // == Clear ==
    /// Drops every entry.
    pub fn clear(&mut self) {
        self.map.clear();
        self.memory_bytes = 0;
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the sum of `size_bytes` over all entries.
    pub fn memory_bytes(&self) -> usize {
        self.memory_bytes
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }
}
