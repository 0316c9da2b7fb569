use crate::error::Result;
use crate::framework::FrameworkLabel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of entry in a recursive repository listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Regular file
    Blob,
    /// Directory
    Tree,
}

/// One entry of a repository's flat file listing (as produced by a recursive
/// tree listing). Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Repository-relative path using `/` separators
    pub path: String,

    /// Blob or tree
    #[serde(alias = "type")]
    pub kind: FileKind,

    /// Size in bytes, when the listing reports one
    #[serde(default, alias = "size", skip_serializing_if = "Option::is_none")]
    pub byte_size: Option<u64>,
}

impl FileDescriptor {
    pub fn blob(path: impl Into<String>, byte_size: Option<u64>) -> Self {
        Self {
            path: path.into(),
            kind: FileKind::Blob,
            byte_size,
        }
    }

    pub fn tree(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: FileKind::Tree,
            byte_size: None,
        }
    }

    pub fn is_blob(&self) -> bool {
        self.kind == FileKind::Blob
    }

    /// Final path segment
    pub fn file_name(&self) -> &str {
        file_name(&self.path)
    }
}

pub(crate) fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Repository metadata as reported by the hosting service.
///
/// Only `full_name` and `default_branch` are required; anything else the
/// source reports is preserved verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    /// `owner/name`
    pub full_name: String,

    pub default_branch: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pushed_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Primary language as reported by the host (not computed here)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl RepositoryMetadata {
    pub fn new(full_name: impl Into<String>, default_branch: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            default_branch: default_branch.into(),
            pushed_at: None,
            updated_at: None,
            language: None,
            description: None,
            extra: BTreeMap::new(),
        }
    }
}

/// Metadata plus file listing, exactly as an external fetcher hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub metadata: RepositoryMetadata,
    pub files: Vec<FileDescriptor>,
}

impl RepositorySnapshot {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Cache key for this snapshot: `owner/name@branch`
    pub fn cache_key(&self) -> String {
        format!(
            "{}@{}",
            self.metadata.full_name, self.metadata.default_branch
        )
    }
}

/// Named group of files sharing a structural role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsystem {
    pub name: String,
    pub description: String,
    /// Member paths in file-list order
    pub member_paths: Vec<String>,
    pub matched_pattern_summary: String,
}

/// Complete classification of one repository snapshot.
///
/// Treated as immutable once returned; later enrichment produces a new value
/// (see [`AnalysisResult::with_architecture_summary`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub repository: RepositoryMetadata,

    /// Full listing keyed by path
    pub files: BTreeMap<String, FileDescriptor>,

    /// Number of blob entries
    pub total_files: usize,

    pub framework: FrameworkLabel,

    pub subsystems: Vec<Subsystem>,

    /// Language name -> total bytes
    pub languages: BTreeMap<String, u64>,

    pub main_files: Vec<String>,
    pub config_files: Vec<String>,
    pub doc_files: Vec<String>,
    pub test_files: Vec<String>,

    pub analyzed_at_ms: u64,

    /// AI-generated architecture overview, attached after the fact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture_summary: Option<String>,
}

impl AnalysisResult {
    pub fn with_architecture_summary(self, summary: impl Into<String>) -> Self {
        Self {
            architecture_summary: Some(summary.into()),
            ..self
        }
    }

    /// Subsystem that claimed `path`, if any
    pub fn subsystem_of(&self, path: &str) -> Option<&Subsystem> {
        self.subsystems
            .iter()
            .find(|s| s.member_paths.iter().any(|p| p == path))
    }

    /// Language with the largest byte total (ties broken by name)
    pub fn primary_language(&self) -> Option<&str> {
        self.languages
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, _)| name.as_str())
    }
}
