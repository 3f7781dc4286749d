//! Single-slot validation cache.
//!
//! Not thread-safe by design (see the crate's concurrency notes): this is a
//! plain owned value the caller holds for the lifetime of one
//! [`crate::LicenseVerifier`], not a hidden process-wide static. A caller
//! sharing a verifier across threads is responsible for its own locking.

/// Remembers the Davies-Meyer hash of the last license body whose RSA
/// signature verified successfully.
#[derive(Debug, Clone, Default)]
pub struct ValidationCache {
    entry: Option<([u8; 16], bool)>,
}

impl ValidationCache {
    /// An empty cache, as held by a freshly constructed verifier.
    #[must_use]
    pub const fn new() -> Self {
        Self { entry: None }
    }

    /// Returns `true` if `dm_hash` matches the cached, already-validated entry.
    #[must_use]
    pub fn hit(&self, dm_hash: &[u8; 16]) -> bool {
        matches!(self.entry, Some((cached, true)) if &cached == dm_hash)
    }

    /// Records that `dm_hash` has just passed RSA verification.
    pub fn record_validated(&mut self, dm_hash: [u8; 16]) {
        self.entry = Some((dm_hash, true));
    }

    /// Clears the cache. Called whenever a post-verification step (fingerprint
    /// check, feature lookup) fails, since `validated == true` must imply the
    /// *whole* verification pipeline succeeded, not just the signature check.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cache_never_hits() {
        let cache = ValidationCache::new();
        assert!(!cache.hit(&[0u8; 16]));
    }

    #[test]
    fn records_and_hits_matching_hash() {
        let mut cache = ValidationCache::new();
        let hash = [7u8; 16];
        cache.record_validated(hash);
        assert!(cache.hit(&hash));
        assert!(!cache.hit(&[9u8; 16]));
    }

    #[test]
    fn clear_removes_the_entry() {
        let mut cache = ValidationCache::new();
        let hash = [3u8; 16];
        cache.record_validated(hash);
        cache.clear();
        assert!(!cache.hit(&hash));
    }
}
