//! Cache Entry Module
//!
//! Defines cached render results and the staleness check applied to them.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Render Output ==
/// A result produced by the external renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// Rendered image bytes
    pub data: Vec<u8>,
    /// MIME type of `data`, e.g. `image/svg+xml`
    pub content_type: String,
}

impl RenderOutput {
    /// Creates a new render output.
    pub fn new(data: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
        }
    }

    /// Returns the payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// == Cache Entry ==
/// Represents a single cached render result with its accounting metadata.
///
/// Built only through [`create_cache_entry`], so `size_bytes` always matches
/// the payload length. Entries are never mutated once built; only their
/// recency position in the store changes.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    output: RenderOutput,
    /// Creation timestamp (Unix milliseconds)
    created_at: u64,
    size_bytes: usize,
}

impl CacheEntry {
    /// The cached render result.
    pub fn output(&self) -> &RenderOutput {
        &self.output
    }

    /// Creation timestamp in Unix milliseconds.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Byte footprint of the payload, used for memory accounting.
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    // == Age ==
    /// Returns the age of the entry in milliseconds relative to `now_ms`.
    ///
    /// Entries stamped in the future (clock adjustments) report an age of 0.
    pub fn age_ms_at(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at)
    }

    /// Returns the current age of the entry in milliseconds.
    pub fn age_ms(&self) -> u64 {
        self.age_ms_at(current_timestamp_ms())
    }

    /// Moves the creation stamp `age_ms` into the past.
    #[cfg(test)]
    pub(crate) fn backdated(mut self, age_ms: u64) -> Self {
        self.created_at = self.created_at.saturating_sub(age_ms);
        self
    }

    /// Replaces the creation stamp.
    #[cfg(test)]
    pub(crate) fn stamped_at(mut self, created_at: u64) -> Self {
        self.created_at = created_at;
        self
    }
}

// == Create Cache Entry ==
/// Wraps a render result into a cache entry stamped with the current time.
///
/// The size is taken from the payload itself rather than from any size the
/// renderer may have reported.
pub fn create_cache_entry(output: RenderOutput) -> CacheEntry {
    let size_bytes = output.len();
    CacheEntry {
        output,
        created_at: current_timestamp_ms(),
        size_bytes,
    }
}

// == Is Entry Valid ==
/// Checks whether an entry is still fresh for the given max-age.
///
/// Returns true iff `now - created_at <= max_age_ms`. The store never calls
/// this on its own; readers decide which freshness they need.
pub fn is_entry_valid(entry: &CacheEntry, max_age_ms: u64) -> bool {
    is_entry_valid_at(entry, max_age_ms, current_timestamp_ms())
}

/// Same as [`is_entry_valid`] against a fixed clock reading.
pub fn is_entry_valid_at(entry: &CacheEntry, max_age_ms: u64, now_ms: u64) -> bool {
    entry.age_ms_at(now_ms) <= max_age_ms
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn entry_aged(age_ms: u64) -> CacheEntry {
        create_cache_entry(RenderOutput::new(b"<svg/>".to_vec(), "image/svg+xml"))
            .backdated(age_ms)
    }

    #[test]
    fn test_create_cache_entry_sizes_from_payload() {
        let entry = create_cache_entry(RenderOutput::new(vec![0u8; 1234], "image/png"));

        assert_eq!(entry.size_bytes(), 1234);
        assert_eq!(entry.output().content_type, "image/png");
        assert!(entry.created_at() <= current_timestamp_ms());
    }

    #[test]
    fn test_create_cache_entry_empty_payload() {
        let entry = create_cache_entry(RenderOutput::new(Vec::new(), "image/svg+xml"));
        assert_eq!(entry.size_bytes(), 0);
        assert!(entry.output().is_empty());
    }

    #[test]
    fn test_fresh_entry_is_valid() {
        let entry = create_cache_entry(RenderOutput::new(b"x".to_vec(), "text/plain"));
        assert!(is_entry_valid(&entry, 60_000));
    }

    #[test]
    fn test_old_entry_is_invalid() {
        let entry = entry_aged(10_000);
        assert!(!is_entry_valid(&entry, 5_000));
        assert!(is_entry_valid(&entry, 60_000));
    }

    #[test]
    fn test_zero_max_age_rejects_aged_entries() {
        let entry = entry_aged(5);
        assert!(!is_entry_valid(&entry, 0));
    }

    #[test]
    fn test_future_entry_is_valid() {
        let entry = entry_aged(0);
        let entry = entry.clone().stamped_at(entry.created_at() + 60_000);

        assert_eq!(entry.age_ms(), 0);
        assert!(is_entry_valid(&entry, 0));
    }

    #[test]
    fn test_age_boundary() {
        let entry =
            create_cache_entry(RenderOutput::new(Vec::new(), "image/svg+xml")).stamped_at(1_000);

        assert_eq!(entry.age_ms_at(1_500), 500);
        assert_eq!(entry.age_ms_at(500), 0);
        assert!(is_entry_valid_at(&entry, 500, 1_500));
        assert!(!is_entry_valid_at(&entry, 499, 1_500));
    }
}
