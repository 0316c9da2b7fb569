use crate::clock::{duration_ms, Clock};
use crate::entry::CacheEntry;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Keyed TTL store with a running byte total.
///
/// Expiry is lazy: [`CachePool::get`] drops an expired entry when it sees one,
/// and [`CachePool::sweep_expired`] drops all of them. Reads never refresh an
/// entry; recency is set at write time only.
pub struct CachePool<T> {
    name: &'static str,
    entries: HashMap<String, CacheEntry<T>>,
    total_bytes: u64,
    next_sequence: u64,
    clock: Arc<dyn Clock>,
}

impl<T: Serialize> CachePool<T> {
    pub fn new(name: &'static str, clock: Arc<dyn Clock>) -> Self {
        Self {
            name,
            entries: HashMap::new(),
            total_bytes: 0,
            next_sequence: 0,
            clock,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Store `value` for `ttl`, replacing any entry under `key`.
    ///
    /// Returns `false` (and leaves the pool untouched) when the value cannot
    /// be measured.
    pub fn put(&mut self, key: impl Into<String>, value: T, ttl: Duration) -> bool {
        let key = key.into();
        let byte_size = match measure(&value) {
            Ok(size) => size,
            Err(err) => {
                log::warn!("{}: not caching {key:?}, size computation failed: {err}", self.name);
                return false;
            }
        };

        let now = self.clock.now_ms();
        let entry = CacheEntry {
            value,
            created_at_ms: now,
            expires_at_ms: now.saturating_add(duration_ms(ttl)),
            byte_size,
            sequence: self.bump_sequence(),
        };
        self.insert_entry(key, entry);
        true
    }

    /// Live value under `key`. An expired entry is removed and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<&T> {
        let now = self.clock.now_ms();
        if self.entries.get(key)?.is_expired(now) {
            self.remove_entry(key);
            log::debug!("{}: {key:?} expired", self.name);
            return None;
        }
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Whether a live entry exists. Does not remove expired entries.
    pub fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    pub fn remove(&mut self, key: &str) -> Option<T> {
        self.remove_entry(key).map(|entry| entry.value)
    }

    /// Drop every expired entry; returns how many were dropped.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.remove_entry(key);
        }
        if !expired.is_empty() {
            log::debug!("{}: swept {} expired entries", self.name, expired.len());
        }
        expired.len()
    }

    /// Remove oldest entries until the pool holds at most `target_bytes`.
    pub fn evict_oldest_until(&mut self, target_bytes: u64) -> usize {
        let mut evicted = 0;
        for (_, key) in self.age_order() {
            if self.total_bytes <= target_bytes {
                break;
            }
            self.remove_entry(&key);
            evicted += 1;
        }
        if evicted > 0 {
            log::debug!("{}: evicted {evicted} entries", self.name);
        }
        evicted
    }

    /// Entry count, including expired entries not yet swept
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.total_bytes = 0;
    }

    /// Keys from oldest to newest
    pub fn keys(&self) -> Vec<String> {
        self.age_order().into_iter().map(|(_, key)| key).collect()
    }

    pub(crate) fn age_order(&self) -> Vec<((u64, u64), String)> {
        let mut order: Vec<((u64, u64), String)> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.age_key(), key.clone()))
            .collect();
        order.sort();
        order
    }

    pub(crate) fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<T>> {
        let entry = self.entries.remove(key)?;
        self.total_bytes = self.total_bytes.saturating_sub(entry.byte_size);
        Some(entry)
    }

    fn insert_entry(&mut self, key: String, entry: CacheEntry<T>) {
        let size = entry.byte_size;
        if let Some(old) = self.entries.insert(key, entry) {
            self.total_bytes = self.total_bytes.saturating_sub(old.byte_size);
        }
        self.total_bytes = self.total_bytes.saturating_add(size);
    }

    fn bump_sequence(&mut self) -> u64 {
        let seq = self.next_sequence;
        self.next_sequence += 1;
        seq
    }
}

impl<T: Serialize + Clone> CachePool<T> {
    /// Entries from oldest to newest
    pub(crate) fn export(&self) -> Vec<(String, CacheEntry<T>)> {
        self.age_order()
            .into_iter()
            .filter_map(|(_, key)| {
                let entry = self.entries.get(&key)?.clone();
                Some((key, entry))
            })
            .collect()
    }

    /// Replace the contents with persisted entries.
    ///
    /// Expired entries are dropped and sizes are recomputed from the values;
    /// stored sizes are not trusted. Returns how many entries were kept.
    pub(crate) fn restore(&mut self, entries: Vec<(String, CacheEntry<T>)>) -> usize {
        self.clear();
        let now = self.clock.now_ms();
        let mut max_sequence = None;
        for (key, mut entry) in entries {
            if entry.is_expired(now) {
                continue;
            }
            match measure(&entry.value) {
                Ok(size) => entry.byte_size = size,
                Err(err) => {
                    log::warn!("{}: dropping persisted {key:?}: {err}", self.name);
                    continue;
                }
            }
            max_sequence = max_sequence.max(Some(entry.sequence));
            self.insert_entry(key, entry);
        }
        self.next_sequence = max_sequence.map_or(0, |seq| seq + 1);
        self.entries.len()
    }
}

/// Approximate footprint: length of the compact JSON encoding
pub(crate) fn measure<T: Serialize>(value: &T) -> serde_json::Result<u64> {
    let bytes = serde_json::to_vec(value)?;
    Ok(bytes.len() as u64)
}
