use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::pool::CachePool;
use crate::snapshot::{CacheSnapshot, SnapshotStore, SNAPSHOT_VERSION};
use repolens_classifier::{AnalysisResult, RepositorySnapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Read-only usage report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub repositories: usize,
    pub analyses: usize,
    pub descriptions: usize,
    pub total_bytes: u64,
    pub max_total_bytes: u64,
    pub usage_percent: f64,
}

/// Pools in cross-pool tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum PoolId {
    Repositories,
    Analyses,
    Descriptions,
}

/// Three TTL pools (repository snapshots, analyses, descriptions) sharing one
/// byte budget.
///
/// Constructed explicitly and handed to whoever needs it; there is no global
/// instance. All operations are infallible from the caller's point of view:
/// failures are logged and degrade to "not cached".
pub struct CacheManager {
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    repositories: CachePool<RepositorySnapshot>,
    analyses: CachePool<AnalysisResult>,
    descriptions: CachePool<String>,
    store: Option<Box<dyn SnapshotStore>>,
}

impl CacheManager {
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("Cache config is invalid ({err}); eviction may behave unexpectedly");
        }
        Self {
            repositories: CachePool::new("repositories", Arc::clone(&clock)),
            analyses: CachePool::new("analyses", Arc::clone(&clock)),
            descriptions: CachePool::new("descriptions", Arc::clone(&clock)),
            config,
            clock,
            store: None,
        }
    }

    /// Construct and hydrate from `store`. A load failure starts empty.
    pub fn init(config: CacheConfig, store: Box<dyn SnapshotStore>) -> Self {
        Self::new(config).with_store(store)
    }

    /// Attach a persistence store and hydrate from it.
    pub fn with_store(mut self, store: Box<dyn SnapshotStore>) -> Self {
        match store.load() {
            Ok(Some(snapshot)) => {
                self.hydrate(snapshot);
            }
            Ok(None) => log::debug!("No cache snapshot found; starting empty"),
            Err(err) => log::warn!("Failed to load cache snapshot, starting empty: {err}"),
        }
        self.store = Some(store);
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn put_repository(&mut self, key: impl Into<String>, value: RepositorySnapshot) -> bool {
        let ttl = self.config.repository_ttl;
        self.put_repository_for(key, value, ttl)
    }

    pub fn put_repository_for(
        &mut self,
        key: impl Into<String>,
        value: RepositorySnapshot,
        ttl: Duration,
    ) -> bool {
        let stored = self.repositories.put(key, value, ttl);
        self.cleanup();
        stored
    }

    pub fn put_analysis(&mut self, key: impl Into<String>, value: AnalysisResult) -> bool {
        let ttl = self.config.analysis_ttl;
        self.put_analysis_for(key, value, ttl)
    }

    pub fn put_analysis_for(
        &mut self,
        key: impl Into<String>,
        value: AnalysisResult,
        ttl: Duration,
    ) -> bool {
        let stored = self.analyses.put(key, value, ttl);
        self.cleanup();
        stored
    }

    pub fn put_description(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let ttl = self.config.description_ttl;
        self.put_description_for(key, value, ttl)
    }

    pub fn put_description_for(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
    ) -> bool {
        let stored = self.descriptions.put(key, value.into(), ttl);
        self.cleanup();
        stored
    }

    pub fn get_repository(&mut self, key: &str) -> Option<&RepositorySnapshot> {
        self.repositories.get(key)
    }

    pub fn get_analysis(&mut self, key: &str) -> Option<&AnalysisResult> {
        self.analyses.get(key)
    }

    pub fn get_description(&mut self, key: &str) -> Option<&str> {
        self.descriptions.get(key).map(String::as_str)
    }

    pub fn remove_repository(&mut self, key: &str) -> Option<RepositorySnapshot> {
        self.repositories.remove(key)
    }

    pub fn remove_analysis(&mut self, key: &str) -> Option<AnalysisResult> {
        self.analyses.remove(key)
    }

    pub fn remove_description(&mut self, key: &str) -> Option<String> {
        self.descriptions.remove(key)
    }

    /// Combined running total of all pools
    pub fn total_bytes(&self) -> u64 {
        self.repositories.total_bytes()
            + self.analyses.total_bytes()
            + self.descriptions.total_bytes()
    }

    /// Sweep expired entries, then evict the globally oldest entries while the
    /// combined total is over budget.
    pub fn cleanup(&mut self) {
        self.repositories.sweep_expired();
        self.analyses.sweep_expired();
        self.descriptions.sweep_expired();

        if self.total_bytes() > self.config.max_total_bytes {
            self.evict_across_pools(self.config.eviction_target_bytes());
        }
    }

    /// Oldest first regardless of pool; ties go to pool order, then insertion order.
    fn evict_across_pools(&mut self, target_bytes: u64) {
        let mut candidates: Vec<((u64, PoolId, u64), String)> = Vec::new();
        let pools = [
            (PoolId::Repositories, self.repositories.age_order()),
            (PoolId::Analyses, self.analyses.age_order()),
            (PoolId::Descriptions, self.descriptions.age_order()),
        ];
        for (pool, order) in pools {
            candidates.extend(
                order
                    .into_iter()
                    .map(|((created, seq), key)| ((created, pool, seq), key)),
            );
        }
        candidates.sort();

        let before = self.total_bytes();
        let mut evicted = 0usize;
        for ((_, pool, _), key) in candidates {
            if self.total_bytes() <= target_bytes {
                break;
            }
            let removed = match pool {
                PoolId::Repositories => self.repositories.remove_entry(&key).is_some(),
                PoolId::Analyses => self.analyses.remove_entry(&key).is_some(),
                PoolId::Descriptions => self.descriptions.remove_entry(&key).is_some(),
            };
            if removed {
                evicted += 1;
            }
        }
        log::debug!(
            "Evicted {evicted} entries across pools ({before} -> {} bytes, target {target_bytes})",
            self.total_bytes()
        );
    }

    /// Empty all pools and delete the persisted snapshot.
    pub fn clear(&mut self) {
        self.repositories.clear();
        self.analyses.clear();
        self.descriptions.clear();
        if let Some(store) = self.store.as_ref() {
            if let Err(err) = store.clear() {
                log::warn!("Failed to delete cache snapshot: {err}");
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        let total_bytes = self.total_bytes();
        let max_total_bytes = self.config.max_total_bytes;
        let usage_percent = if max_total_bytes == 0 {
            0.0
        } else {
            total_bytes as f64 / max_total_bytes as f64 * 100.0
        };
        CacheStats {
            repositories: self.repositories.len(),
            analyses: self.analyses.len(),
            descriptions: self.descriptions.len(),
            total_bytes,
            max_total_bytes,
            usage_percent,
        }
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at_ms: self.clock.now_ms(),
            repositories: self.repositories.export(),
            analyses: self.analyses.export(),
            descriptions: self.descriptions.export(),
        }
    }

    /// Replace the contents with `snapshot`, dropping entries that expired
    /// meanwhile, then enforce the budget. Returns how many entries survived.
    pub fn hydrate(&mut self, snapshot: CacheSnapshot) -> usize {
        if snapshot.version != SNAPSHOT_VERSION {
            log::warn!(
                "Ignoring cache snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            );
            return 0;
        }
        let offered = snapshot.entry_count();
        self.repositories.restore(snapshot.repositories);
        self.analyses.restore(snapshot.analyses);
        self.descriptions.restore(snapshot.descriptions);
        self.cleanup();

        let kept = self.repositories.len() + self.analyses.len() + self.descriptions.len();
        log::debug!("Hydrated {kept} of {offered} cached entries");
        kept
    }

    /// Write the current contents to the attached store, if any.
    pub fn persist(&self) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };
        match store.save(&self.snapshot()) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Failed to persist cache snapshot: {err}");
                false
            }
        }
    }

    /// Persist and release the manager.
    pub fn dispose(self) {
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::{PersistenceError, Result};
    use pretty_assertions::assert_eq;
    use repolens_classifier::{analyze_at, FileDescriptor, RepositoryMetadata};
    use std::sync::Mutex;

    const HOUR: Duration = Duration::from_secs(3600);

    fn manager(max_total_bytes: u64, clock: &ManualClock) -> CacheManager {
        let config = CacheConfig::default().with_max_total_bytes(max_total_bytes);
        CacheManager::with_clock(config, Arc::new(clock.clone()))
    }

    fn sample_snapshot(name: &str) -> RepositorySnapshot {
        RepositorySnapshot {
            metadata: RepositoryMetadata::new(format!("acme/{name}"), "main"),
            files: vec![FileDescriptor::blob("README.md", Some(10))],
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<Option<CacheSnapshot>>,
        fail: bool,
    }

    impl SnapshotStore for MemoryStore {
        fn load(&self) -> Result<Option<CacheSnapshot>> {
            if self.fail {
                return Err(PersistenceError::UnsupportedVersion {
                    found: 0,
                    expected: SNAPSHOT_VERSION,
                });
            }
            Ok(self.saved.lock().unwrap().clone())
        }

        fn save(&self, snapshot: &CacheSnapshot) -> Result<()> {
            if self.fail {
                return Err(std::io::Error::other("disk full").into());
            }
            *self.saved.lock().unwrap() = Some(snapshot.clone());
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            *self.saved.lock().unwrap() = None;
            Ok(())
        }
    }

    #[test]
    fn pools_are_independent_namespaces() {
        let clock = ManualClock::new(0);
        let mut cache = manager(1 << 20, &clock);
        cache.put_description("acme/site@main", "A marketing site");
        cache.put_repository("acme/site@main", sample_snapshot("site"));

        assert_eq!(cache.get_description("acme/site@main"), Some("A marketing site"));
        assert!(cache.get_repository("acme/site@main").is_some());
        assert!(cache.get_analysis("acme/site@main").is_none());
        let stats = cache.stats();
        assert_eq!((stats.repositories, stats.analyses, stats.descriptions), (1, 0, 1));
    }

    #[test]
    fn cross_pool_eviction_takes_globally_oldest_first() {
        let clock = ManualClock::new(0);
        let repo = sample_snapshot("old");
        let repo_bytes = crate::pool::measure(&repo).unwrap();
        // Fits the repository plus a 40-byte description, with 2 bytes to spare.
        let mut cache = manager(repo_bytes + 42, &clock);

        cache.put_repository("old", repo);
        clock.set(1);
        cache.put_description("newer", "y".repeat(38));
        assert_eq!(cache.total_bytes(), repo_bytes + 40);

        // Overflow is triggered from the descriptions pool, yet the older
        // repository entry is the one that goes.
        clock.set(2);
        cache.put_description("trigger", "z");

        assert!(cache.get_repository("old").is_none());
        assert_eq!(cache.get_description("newer").map(str::len), Some(38));
        assert_eq!(cache.get_description("trigger"), Some("z"));
        assert_eq!(cache.total_bytes(), 43);
    }

    #[test]
    fn same_millisecond_ties_follow_pool_order() {
        let clock = ManualClock::new(7);
        let repo = sample_snapshot("tie");
        let repo_bytes = crate::pool::measure(&repo).unwrap();
        let mut cache = manager(repo_bytes + 42, &clock);

        cache.put_description("first", "d".repeat(38));
        cache.put_repository("second", repo);
        cache.put_description("trigger", "z");

        assert!(cache.get_repository("second").is_none());
        assert!(cache.get_description("first").is_some());
    }

    #[test]
    fn analysis_pool_participates_in_shared_budget() {
        let clock = ManualClock::new(0);
        let files = vec![FileDescriptor::blob("main.go", Some(1))];
        let metadata = RepositoryMetadata::new("acme/tool", "main");
        let analysis = analyze_at(&metadata, &files, 0).unwrap();
        let analysis_bytes = crate::pool::measure(&analysis).unwrap();
        let mut cache = manager(analysis_bytes + 10, &clock);

        cache.put_analysis("acme/tool@main", analysis);
        clock.set(1);
        cache.put_description("note", "n".repeat(20));

        assert!(cache.get_analysis("acme/tool@main").is_none());
        assert_eq!(cache.stats().descriptions, 1);
    }

    #[test]
    fn ttl_overrides_expire_independently() {
        let clock = ManualClock::new(0);
        let mut cache = manager(1 << 20, &clock);
        cache.put_description_for("short", "s", Duration::ZERO);
        cache.put_description("long", "l");
        clock.advance(Duration::from_millis(1));
        assert_eq!(cache.get_description("short"), None);
        assert_eq!(cache.get_description("long"), Some("l"));
        assert_eq!(cache.total_bytes(), 3);
    }

    #[test]
    fn default_ttls_follow_config() {
        let clock = ManualClock::new(0);
        let mut cache = manager(1 << 20, &clock);
        cache.put_description("d", "desc");
        cache.put_repository("r", sample_snapshot("r"));
        clock.advance(HOUR * 24);
        assert!(cache.get_repository("r").is_none());
        assert_eq!(cache.get_description("d"), Some("desc"));
        clock.advance(HOUR * 24);
        assert_eq!(cache.get_description("d"), None);
    }

    #[test]
    fn clear_resets_everything_and_drops_snapshot() {
        let clock = ManualClock::new(0);
        let mut cache = manager(1 << 20, &clock).with_store(Box::new(MemoryStore::default()));
        cache.put_description("k", "v");
        assert!(cache.persist());
        cache.clear();
        assert_eq!(cache.total_bytes(), 0);
        assert_eq!(cache.stats().descriptions, 0);
        let store = cache.store.as_ref().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn stats_report_usage_percent() {
        let clock = ManualClock::new(0);
        let mut cache = manager(1_000, &clock);
        cache.put_description("k", "x".repeat(248));
        let stats = cache.stats();
        assert_eq!(stats.total_bytes, 250);
        assert_eq!(stats.max_total_bytes, 1_000);
        assert!((stats.usage_percent - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hydrate_skips_expired_and_enforces_budget() {
        let clock = ManualClock::new(0);
        let mut source = manager(1 << 20, &clock);
        source.put_description_for("stale", "s", Duration::from_millis(50));
        source.put_description("a", "x".repeat(48));
        clock.set(10);
        source.put_description("b", "y".repeat(48));
        let snapshot = source.snapshot();
        assert_eq!(snapshot.descriptions.len(), 3);

        clock.set(100);
        let mut restored = manager(90, &clock);
        let kept = restored.hydrate(snapshot);
        assert_eq!(kept, 1);
        assert_eq!(restored.get_description("a"), None);
        assert_eq!(restored.get_description("b").map(str::len), Some(48));
    }

    #[test]
    fn hydrate_ignores_unknown_version() {
        let clock = ManualClock::new(0);
        let mut cache = manager(1 << 20, &clock);
        let mut snapshot = CacheSnapshot::empty(0);
        snapshot.version = 99;
        snapshot.descriptions.push((
            "k".to_string(),
            crate::entry::CacheEntry {
                value: "v".to_string(),
                created_at_ms: 0,
                expires_at_ms: u64::MAX,
                byte_size: 3,
                sequence: 0,
            },
        ));
        assert_eq!(cache.hydrate(snapshot), 0);
        assert_eq!(cache.total_bytes(), 0);
    }

    #[test]
    fn failing_store_degrades_to_empty_uncached_state() {
        let clock = ManualClock::new(0);
        let store = MemoryStore {
            fail: true,
            ..MemoryStore::default()
        };
        let mut cache = manager(1 << 20, &clock).with_store(Box::new(store));
        assert_eq!(cache.total_bytes(), 0);
        assert!(cache.put_description("k", "v"));
        assert!(!cache.persist());
        cache.dispose();
    }

    #[test]
    fn dispose_persists() {
        let clock = ManualClock::new(0);
        let store = Arc::new(MemoryStore::default());

        struct Shared(Arc<MemoryStore>);
        impl SnapshotStore for Shared {
            fn load(&self) -> Result<Option<CacheSnapshot>> {
                self.0.load()
            }
            fn save(&self, snapshot: &CacheSnapshot) -> Result<()> {
                self.0.save(snapshot)
            }
            fn clear(&self) -> Result<()> {
                self.0.clear()
            }
        }

        let mut cache =
            manager(1 << 20, &clock).with_store(Box::new(Shared(Arc::clone(&store))));
        cache.put_description("k", "v");
        cache.dispose();
        let saved = store.saved.lock().unwrap().clone().unwrap();
        assert_eq!(saved.descriptions[0].0, "k");
    }
}
