use crate::framework::FrameworkLabel;
use crate::matcher::{matches_extension_lc, matches_pattern_lc};
use crate::rules::{ordered_rules, rules_for, SubsystemRule};
use crate::types::{FileDescriptor, Subsystem};

/// Name of the catch-all subsystem
pub const OTHER_SUBSYSTEM: &str = "Other";

const OTHER_DESCRIPTION: &str = "Files not claimed by any framework-specific rule";

/// Partition the blob entries of `files` into subsystems using the rule table
/// of `framework`.
pub fn classify_subsystems(files: &[FileDescriptor], framework: FrameworkLabel) -> Vec<Subsystem> {
    classify_with_rules(files, rules_for(framework))
}

/// Partition with an explicit rule table.
///
/// First match wins: a rule only sees blobs that no earlier rule claimed. A
/// path whose extension fails a rule's `allowed_extensions` stays unclaimed
/// and remains available to later rules. Every blob ends up in exactly one
/// subsystem; leftovers go to [`OTHER_SUBSYSTEM`].
pub fn classify_with_rules(files: &[FileDescriptor], rules: &[SubsystemRule]) -> Vec<Subsystem> {
    let blobs: Vec<(&str, String)> = files
        .iter()
        .filter(|f| f.is_blob())
        .map(|f| (f.path.as_str(), f.path.to_ascii_lowercase()))
        .collect();
    let mut claimed = vec![false; blobs.len()];
    let mut subsystems = Vec::new();

    for rule in ordered_rules(rules) {
        let patterns: Vec<String> = rule
            .path_patterns
            .iter()
            .map(|p| p.to_ascii_lowercase())
            .collect();
        let extensions: Option<Vec<String>> = rule
            .allowed_extensions
            .map(|exts| exts.iter().map(|e| e.to_ascii_lowercase()).collect());

        let mut members = Vec::new();
        for (idx, (path, path_lc)) in blobs.iter().enumerate() {
            if claimed[idx] {
                continue;
            }
            if !patterns.iter().any(|p| matches_pattern_lc(path_lc, p)) {
                continue;
            }
            if let Some(exts) = extensions.as_ref() {
                if !exts.iter().any(|e| matches_extension_lc(path_lc, e)) {
                    continue;
                }
            }
            claimed[idx] = true;
            members.push((*path).to_string());
        }

        log::debug!("Rule {:?} claimed {} files", rule.name, members.len());
        if members.is_empty() {
            continue;
        }
        subsystems.push(Subsystem {
            name: rule.name.to_string(),
            description: rule.description.to_string(),
            member_paths: members,
            matched_pattern_summary: rule.pattern_summary(),
        });
    }

    let leftovers: Vec<String> = blobs
        .iter()
        .zip(claimed.iter())
        .filter(|(_, claimed)| !**claimed)
        .map(|((path, _), _)| (*path).to_string())
        .collect();
    if !leftovers.is_empty() {
        subsystems.push(Subsystem {
            name: OTHER_SUBSYSTEM.to_string(),
            description: OTHER_DESCRIPTION.to_string(),
            member_paths: leftovers,
            matched_pattern_summary: "*".to_string(),
        });
    }

    subsystems
}
