use crate::types::{file_name, FileDescriptor};
use serde::{Deserialize, Serialize};

const MAIN_FILE_NAMES: &[&str] = &[
    "readme.md",
    "index.js",
    "index.ts",
    "main.py",
    "app.py",
    "index.html",
    "package.json",
];

const MANIFEST_NAMES: &[&str] = &["package.json", "requirements.txt", "pyproject.toml"];

/// Paths tagged by role. Categories overlap freely with each other and with
/// subsystem membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialFiles {
    pub main_files: Vec<String>,
    pub config_files: Vec<String>,
    pub doc_files: Vec<String>,
    pub test_files: Vec<String>,
}

pub fn is_main_file(path: &str) -> bool {
    let lc = path.to_ascii_lowercase();
    MAIN_FILE_NAMES.contains(&file_name(&lc))
}

pub fn is_config_file(path: &str) -> bool {
    let lc = path.to_ascii_lowercase();
    lc.contains("config")
        || lc.ends_with(".config.js")
        || lc.ends_with(".config.ts")
        || MANIFEST_NAMES.contains(&file_name(&lc))
        || lc.contains(".env")
        || lc.contains("dockerfile")
}

pub fn is_doc_file(path: &str) -> bool {
    let lc = path.to_ascii_lowercase();
    lc.ends_with(".md") || lc.contains("docs/") || lc.contains("documentation/")
}

/// Plain substring check: `testimonials.ts` and `inspector.py` count as tests.
pub fn is_test_file(path: &str) -> bool {
    let lc = path.to_ascii_lowercase();
    lc.contains("test") || lc.contains("spec") || lc.contains("__tests__/")
}

/// Tag blob entries as main/config/doc/test files, preserving file-list order.
pub fn categorize_special_files(files: &[FileDescriptor]) -> SpecialFiles {
    let mut out = SpecialFiles::default();
    for file in files.iter().filter(|f| f.is_blob()) {
        let path = &file.path;
        if is_main_file(path) {
            out.main_files.push(path.clone());
        }
        if is_config_file(path) {
            out.config_files.push(path.clone());
        }
        if is_doc_file(path) {
            out.doc_files.push(path.clone());
        }
        if is_test_file(path) {
            out.test_files.push(path.clone());
        }
    }
    out
}
