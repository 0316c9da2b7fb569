//! # Repolens Cache
//!
//! Size-bounded, TTL-expiring in-memory cache for repository snapshots,
//! analysis results and short AI-written descriptions.
//!
//! ## Architecture
//!
//! ```text
//! CacheManager (one shared byte budget)
//!     │
//!     ├──> CachePool<RepositorySnapshot>   (default TTL 24h)
//!     ├──> CachePool<AnalysisResult>       (default TTL 12h)
//!     ├──> CachePool<String>               (default TTL 48h)
//!     │
//!     ├──> cleanup(): sweep expired, then evict the globally oldest
//!     │               entries down to 80% of the budget
//!     │
//!     └──> SnapshotStore (optional)
//!            └─ JsonFileSnapshotStore: hydrate on init, persist on dispose
//! ```
//!
//! Expiry is checked lazily on read. Recency is write time only, so under
//! pressure the cache behaves like FIFO rather than LRU.
//!
//! ## Example
//!
//! ```rust
//! use repolens_cache::{CacheConfig, CacheManager};
//!
//! let mut cache = CacheManager::new(CacheConfig::default());
//! cache.put_description("acme/site@main", "Marketing site built with SvelteKit");
//! assert_eq!(
//!     cache.get_description("acme/site@main"),
//!     Some("Marketing site built with SvelteKit")
//! );
//! ```

mod clock;
mod config;
mod entry;
mod error;
mod manager;
mod pool;
mod snapshot;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheConfig, DEFAULT_EVICTION_TARGET_RATIO, DEFAULT_MAX_TOTAL_BYTES};
pub use entry::CacheEntry;
pub use error::{ConfigError, PersistenceError, Result};
pub use manager::{CacheManager, CacheStats};
pub use pool::CachePool;
pub use snapshot::{CacheSnapshot, JsonFileSnapshotStore, SnapshotStore, SNAPSHOT_VERSION};
