use serde::{Deserialize, Serialize};

/// One cached value with its bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub value: T,
    pub created_at_ms: u64,
    pub expires_at_ms: u64,
    /// Approximate serialized size of `value`
    pub byte_size: u64,
    /// Insertion order within the owning pool; breaks `created_at_ms` ties
    pub sequence: u64,
}

impl<T> CacheEntry<T> {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }

    /// Eviction order key: oldest first
    pub(crate) fn age_key(&self) -> (u64, u64) {
        (self.created_at_ms, self.sequence)
    }
}
