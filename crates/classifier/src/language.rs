use crate::types::{file_name, FileDescriptor};
use std::collections::BTreeMap;

/// Language name for a lowercase extension (without the dot).
///
/// Unmapped extensions fall back to the uppercased extension itself.
pub fn language_for_extension(ext: &str) -> String {
    let name = match ext {
        "ts" | "tsx" | "mts" | "cts" => "TypeScript",
        "js" | "jsx" | "mjs" | "cjs" => "JavaScript",
        "py" | "pyi" | "pyw" => "Python",
        "ipynb" => "Jupyter Notebook",
        "svelte" => "Svelte",
        "vue" => "Vue",
        "html" | "htm" => "HTML",
        "css" => "CSS",
        "scss" | "sass" => "SCSS",
        "less" => "Less",
        "json" => "JSON",
        "md" | "mdx" => "Markdown",
        "yml" | "yaml" => "YAML",
        "toml" => "TOML",
        "rs" => "Rust",
        "go" => "Go",
        "java" => "Java",
        "kt" | "kts" => "Kotlin",
        "rb" => "Ruby",
        "php" => "PHP",
        "c" | "h" => "C",
        "cpp" | "cc" | "cxx" | "hpp" => "C++",
        "cs" => "C#",
        "swift" => "Swift",
        "sh" | "bash" | "zsh" => "Shell",
        "sql" => "SQL",
        _ => return ext.to_ascii_uppercase(),
    };
    name.to_string()
}

/// Lowercase extension of the final path segment.
///
/// Names without a dot and dotfiles such as `.gitignore` have no extension.
pub fn file_extension(path: &str) -> Option<String> {
    let name = file_name(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Sum blob sizes per language. Blobs without a size or extension are skipped.
pub fn language_histogram(files: &[FileDescriptor]) -> BTreeMap<String, u64> {
    let mut languages = BTreeMap::new();
    for file in files.iter().filter(|f| f.is_blob()) {
        let Some(size) = file.byte_size else {
            continue;
        };
        let Some(ext) = file_extension(&file.path) else {
            continue;
        };
        let total = languages.entry(language_for_extension(&ext)).or_insert(0u64);
        *total = total.saturating_add(size);
    }
    languages
}
