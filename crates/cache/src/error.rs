use thiserror::Error;

/// Result type for the persistence boundary
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Failures while loading, saving or deleting a cache snapshot.
///
/// Never surfaced by [`crate::CacheManager`]: it logs them and carries on
/// with an empty (or unsaved) cache.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Rejected cache configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("max_total_bytes must be greater than zero")]
    ZeroBudget,

    #[error("eviction_target_ratio must be in (0, 1], got {0}")]
    InvalidEvictionRatio(f64),
}
