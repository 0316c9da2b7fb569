//! # Repolens Classifier
//!
//! Classifies a repository snapshot (paths and sizes only) into a structured,
//! immutable analysis.
//!
//! ## Pipeline
//!
//! ```text
//! RepositoryMetadata + FileDescriptor[]
//!     │
//!     ├──> Framework Detector (ordered heuristics, first hit wins)
//!     │
//!     ├──> Subsystem Classifier (per-framework rule table)
//!     │      └─> Subsystem[] + "Other" catch-all (exact partition of blobs)
//!     │
//!     ├──> Special-File Categorizer
//!     │      └─> main / config / doc / test paths (overlapping)
//!     │
//!     └──> Language Histogram
//!            └─> language -> bytes
//! ```
//!
//! ## Example
//!
//! ```rust
//! use repolens_classifier::{analyze, FileDescriptor, FrameworkLabel, RepositoryMetadata};
//!
//! let metadata = RepositoryMetadata::new("acme/site", "main");
//! let files = vec![
//!     FileDescriptor::blob("svelte.config.js", Some(200)),
//!     FileDescriptor::blob("src/routes/+page.svelte", Some(1_200)),
//! ];
//!
//! let result = analyze(&metadata, &files).unwrap();
//! assert_eq!(result.framework, FrameworkLabel::Svelte);
//! ```

mod analyzer;
mod error;
mod framework;
mod language;
mod matcher;
mod rules;
mod special_files;
mod subsystems;
mod types;

pub use analyzer::{analyze, analyze_at, analyze_snapshot};
pub use error::{ClassifierError, Result};
pub use framework::{detect_framework, FrameworkLabel};
pub use language::{file_extension, language_for_extension, language_histogram};
pub use matcher::{matches_extension, matches_pattern};
pub use rules::{rules_for, SubsystemRule};
pub use special_files::{
    categorize_special_files, is_config_file, is_doc_file, is_main_file, is_test_file,
    SpecialFiles,
};
pub use subsystems::{classify_subsystems, classify_with_rules, OTHER_SUBSYSTEM};
pub use types::{
    AnalysisResult, FileDescriptor, FileKind, RepositoryMetadata, RepositorySnapshot, Subsystem,
};
