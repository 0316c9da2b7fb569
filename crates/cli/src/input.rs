use anyhow::{Context, Result};
use repolens_classifier::RepositorySnapshot;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read a repository snapshot document from a file, or from stdin when the
/// path is `-`.
pub fn read_snapshot(input: &Path) -> Result<RepositorySnapshot> {
    let raw = read_input(input)?;
    if raw.trim().is_empty() {
        anyhow::bail!("Repository snapshot is empty. Provide a JSON file or pipe JSON via stdin.");
    }
    RepositorySnapshot::from_json(&raw)
        .with_context(|| format!("Invalid repository snapshot in {}", display_name(input)))
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read JSON from stdin")?;
        return Ok(buffer);
    }
    fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn display_name(input: &Path) -> String {
    if input == Path::new("-") {
        "stdin".to_string()
    } else {
        input.display().to_string()
    }
}
