use crate::entry::CacheEntry;
use crate::error::{PersistenceError, Result};
use repolens_classifier::{AnalysisResult, RepositorySnapshot};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable contents of all three pools.
///
/// Entries are listed oldest first. Byte sizes are informational; hydration
/// recomputes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub version: u32,
    pub saved_at_ms: u64,
    #[serde(default)]
    pub repositories: Vec<(String, CacheEntry<RepositorySnapshot>)>,
    #[serde(default)]
    pub analyses: Vec<(String, CacheEntry<AnalysisResult>)>,
    #[serde(default)]
    pub descriptions: Vec<(String, CacheEntry<String>)>,
}

impl CacheSnapshot {
    pub fn empty(saved_at_ms: u64) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at_ms,
            repositories: Vec::new(),
            analyses: Vec::new(),
            descriptions: Vec::new(),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.repositories.len() + self.analyses.len() + self.descriptions.len()
    }
}

/// Storage medium for cache snapshots
pub trait SnapshotStore: Send {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<CacheSnapshot>>;

    fn save(&self, snapshot: &CacheSnapshot) -> Result<()>;

    /// Delete the stored snapshot; deleting nothing is not an error
    fn clear(&self) -> Result<()>;
}

/// Snapshot kept as one JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "cache.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load(&self) -> Result<Option<CacheSnapshot>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let snapshot: CacheSnapshot = serde_json::from_slice(&bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &CacheSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec(snapshot)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
