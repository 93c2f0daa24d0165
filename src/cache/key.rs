//! Cache Key Module
//!
//! Derives fixed-size, content-addressed keys for render results.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest identifying a (source, diagram format, output format) triple.
pub type CacheKey = String;

/// Length of every key produced by [`generate_key`].
pub const KEY_LENGTH: usize = 64;

// == Generate Key ==
/// Derives the cache key for a render request.
///
/// Each field is fed to the hasher as `<byte length>:<bytes>` so that
/// `("ab", "c")` and `("a", "bc")` never produce the same input stream.
/// The key is always [`KEY_LENGTH`] lowercase hex characters, however long
/// the source is.
pub fn generate_key(source_code: &str, diagram_format: &str, output_format: &str) -> CacheKey {
    let mut hasher = Sha256::new();
    for field in [source_code, diagram_format, output_format] {
        hasher.update(field.len().to_string().as_bytes());
        hasher.update(b":");
        hasher.update(field.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
