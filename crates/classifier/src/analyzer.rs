use crate::error::{ClassifierError, Result};
use crate::framework::detect_framework;
use crate::language::language_histogram;
use crate::special_files::categorize_special_files;
use crate::subsystems::classify_subsystems;
use crate::types::{AnalysisResult, FileDescriptor, RepositoryMetadata, RepositorySnapshot};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Classify a repository listing, stamped with the current time.
///
/// Pure in-memory composition: detection runs once, then subsystem
/// partitioning, special-file tagging and the language histogram each run
/// once over the same listing. Input is validated up front, so an error never
/// leaves a partial result behind.
pub fn analyze(metadata: &RepositoryMetadata, files: &[FileDescriptor]) -> Result<AnalysisResult> {
    analyze_at(metadata, files, unix_ms_now())
}

/// [`analyze`] with an explicit timestamp; identical inputs give identical output.
pub fn analyze_at(
    metadata: &RepositoryMetadata,
    files: &[FileDescriptor],
    analyzed_at_ms: u64,
) -> Result<AnalysisResult> {
    validate_metadata(metadata)?;
    let lookup = build_file_lookup(files)?;

    let framework = detect_framework(files);
    let subsystems = classify_subsystems(files, framework);
    let special = categorize_special_files(files);
    let languages = language_histogram(files);
    let total_files = files.iter().filter(|f| f.is_blob()).count();

    log::info!(
        "Analyzed {}: framework={}, {} files, {} subsystems, {} languages",
        metadata.full_name,
        framework,
        total_files,
        subsystems.len(),
        languages.len()
    );

    Ok(AnalysisResult {
        repository: metadata.clone(),
        files: lookup,
        total_files,
        framework,
        subsystems,
        languages,
        main_files: special.main_files,
        config_files: special.config_files,
        doc_files: special.doc_files,
        test_files: special.test_files,
        analyzed_at_ms,
        architecture_summary: None,
    })
}

pub fn analyze_snapshot(snapshot: &RepositorySnapshot) -> Result<AnalysisResult> {
    analyze(&snapshot.metadata, &snapshot.files)
}

fn validate_metadata(metadata: &RepositoryMetadata) -> Result<()> {
    let full_name = metadata.full_name.trim();
    if full_name.is_empty() {
        return Err(ClassifierError::invalid_metadata("full_name is empty"));
    }
    match full_name.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {}
        _ => {
            return Err(ClassifierError::invalid_metadata(format!(
                "full_name must look like owner/name, got {full_name:?}"
            )))
        }
    }
    if metadata.default_branch.trim().is_empty() {
        return Err(ClassifierError::invalid_metadata("default_branch is empty"));
    }
    Ok(())
}

fn build_file_lookup(files: &[FileDescriptor]) -> Result<BTreeMap<String, FileDescriptor>> {
    if files.is_empty() {
        return Err(ClassifierError::EmptyFileList);
    }
    let mut lookup = BTreeMap::new();
    for file in files {
        if file.path.trim().is_empty() {
            return Err(ClassifierError::InvalidPath(file.path.clone()));
        }
        if lookup.insert(file.path.clone(), file.clone()).is_some() {
            return Err(ClassifierError::DuplicatePath(file.path.clone()));
        }
    }
    Ok(lookup)
}

fn unix_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
