//! Framework detection over repository paths.
//!
//! Heuristics overlap (every Next.js app also looks like a React app), so they
//! are evaluated in a fixed order and the first hit wins. Only paths are
//! inspected, never file contents.

use crate::types::{file_name, FileDescriptor, FileKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

/// Detected web/application framework or ecosystem category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameworkLabel {
    MultiFramework,
    Nextjs,
    React,
    Svelte,
    Flask,
    Fastapi,
    PythonCli,
    PythonLib,
    Unknown,
}

impl FrameworkLabel {
    /// All labels, in detection order
    pub const ALL: [FrameworkLabel; 9] = [
        FrameworkLabel::MultiFramework,
        FrameworkLabel::Nextjs,
        FrameworkLabel::React,
        FrameworkLabel::Svelte,
        FrameworkLabel::Flask,
        FrameworkLabel::Fastapi,
        FrameworkLabel::PythonCli,
        FrameworkLabel::PythonLib,
        FrameworkLabel::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FrameworkLabel::MultiFramework => "multi-framework",
            FrameworkLabel::Nextjs => "nextjs",
            FrameworkLabel::React => "react",
            FrameworkLabel::Svelte => "svelte",
            FrameworkLabel::Flask => "flask",
            FrameworkLabel::Fastapi => "fastapi",
            FrameworkLabel::PythonCli => "python-cli",
            FrameworkLabel::PythonLib => "python-lib",
            FrameworkLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FrameworkLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameworkLabel {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lowered = raw.trim().to_ascii_lowercase();
        FrameworkLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == lowered)
            .ok_or_else(|| format!("unknown framework label: {raw}"))
    }
}

/// Frontend framework names looked for under `examples/`
const FRONTEND_KEYWORDS: &[&str] = &[
    "react", "vue", "svelte", "angular", "solid", "preact", "next", "nuxt", "qwik", "lit",
];

const NEXT_CONFIGS: &[&str] = &[
    "next.config.js",
    "next.config.ts",
    "next.config.mjs",
    "next.config.cjs",
];

const PACKAGING_FILES: &[&str] = &["poetry.lock", "setup.py", "setup.cfg", "pyproject.toml"];

/// Lowercased view of a listing with the lookups the heuristics need.
struct RepoShape {
    /// Every entry path (blob and tree)
    paths: Vec<String>,
    /// Blob base names
    names: HashSet<String>,
    /// Tree paths
    dirs: HashSet<String>,
}

impl RepoShape {
    fn new(files: &[FileDescriptor]) -> Self {
        let mut paths = Vec::with_capacity(files.len());
        let mut names = HashSet::new();
        let mut dirs = HashSet::new();
        for file in files {
            let lc = file.path.to_ascii_lowercase();
            match file.kind {
                FileKind::Blob => {
                    names.insert(file_name(&lc).to_string());
                }
                FileKind::Tree => {
                    dirs.insert(lc.trim_end_matches('/').to_string());
                }
            }
            paths.push(lc);
        }
        Self { paths, names, dirs }
    }

    fn has_file(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn has_any_file(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.has_file(name))
    }

    fn has_file_starting_with(&self, prefix: &str) -> bool {
        self.names.iter().any(|name| name.starts_with(prefix))
    }

    fn has_extension(&self, ext: &str) -> bool {
        self.names.iter().any(|name| name.ends_with(ext))
    }

    /// Top-level directory `dir` (no trailing slash)
    fn has_root_dir(&self, dir: &str) -> bool {
        if self.dirs.contains(dir) {
            return true;
        }
        let prefix = format!("{dir}/");
        self.paths.iter().any(|p| p.starts_with(&prefix))
    }

    /// Directory `dir` at any depth (no trailing slash)
    fn has_dir_anywhere(&self, dir: &str) -> bool {
        let prefix = format!("{dir}/");
        let nested = format!("/{dir}/");
        let suffix = format!("/{dir}");
        self.paths.iter().any(|p| {
            p == dir || p.starts_with(&prefix) || p.contains(&nested) || p.ends_with(&suffix)
        })
    }

    fn has_package_manifest(&self) -> bool {
        self.has_file("package.json")
    }

    fn has_readme(&self) -> bool {
        self.has_file_starting_with("readme")
    }

    fn has_python_sources(&self) -> bool {
        self.has_extension(".py")
    }

    fn has_python_manifest(&self) -> bool {
        self.has_any_file(&["requirements.txt", "pyproject.toml"])
    }

    fn has_packaging_files(&self) -> bool {
        self.has_any_file(PACKAGING_FILES)
    }

    /// Distinct frontend keywords below `examples/`.
    ///
    /// Segments are split into words on non-alphanumerics and a keyword must
    /// start a word: `nextjs-app` counts as `next`, while `preact-demo` is not
    /// `react` and `split-view` is not `lit`.
    fn example_frameworks(&self) -> BTreeSet<&'static str> {
        let mut found = BTreeSet::new();
        for path in &self.paths {
            let Some(rest) = path.strip_prefix("examples/") else {
                continue;
            };
            let words = rest
                .split(|c: char| !c.is_ascii_alphanumeric())
                .filter(|w| !w.is_empty());
            for word in words {
                for keyword in FRONTEND_KEYWORDS {
                    if word.starts_with(keyword) {
                        found.insert(*keyword);
                    }
                }
            }
        }
        found
    }

    fn has_cli_paths(&self) -> bool {
        self.has_any_file(&["main.py", "__main__.py"])
            || self.paths.iter().any(|p| {
                p.contains("cli")
                    || p.contains("command")
                    || p.starts_with("bin/")
                    || p.contains("/bin/")
            })
    }
}

fn is_multi_framework(shape: &RepoShape) -> bool {
    shape.example_frameworks().len() >= 2 && shape.has_package_manifest() && shape.has_readme()
}

fn is_nextjs(shape: &RepoShape) -> bool {
    shape.has_any_file(NEXT_CONFIGS)
        || ((shape.has_root_dir("pages") || shape.has_root_dir("app"))
            && shape.has_package_manifest())
}

fn is_react(shape: &RepoShape) -> bool {
    shape.has_package_manifest() && (shape.has_extension(".jsx") || shape.has_extension(".tsx"))
}

fn is_svelte(shape: &RepoShape) -> bool {
    // The middle clause is subsumed by the last one.
    shape.has_file_starting_with("svelte.config.")
        || (shape.has_extension(".svelte") && shape.has_dir_anywhere("src/routes"))
        || shape.has_extension(".svelte")
}

fn is_flask(shape: &RepoShape) -> bool {
    shape.has_any_file(&["app.py", "wsgi.py"])
        && shape.has_python_manifest()
        && shape.has_python_sources()
        && shape.has_any_file(&["app.py", "run.py"])
}

fn is_fastapi(shape: &RepoShape) -> bool {
    shape.has_file("main.py") && shape.has_python_manifest()
}

fn is_python_cli(shape: &RepoShape) -> bool {
    shape.has_file("pyproject.toml")
        && shape.has_python_sources()
        && shape.has_cli_paths()
        && shape.has_packaging_files()
}

fn is_python_lib(shape: &RepoShape) -> bool {
    let src_layout = shape.has_root_dir("src")
        && shape.has_root_dir("tests")
        && !shape.has_any_file(&["app.py", "main.py"])
        && shape.has_packaging_files();
    let packaged = shape.has_any_file(&["setup.py", "pyproject.toml"])
        && shape.has_python_sources()
        && !shape.has_any_file(&["app.py", "main.py", "wsgi.py"]);
    src_layout || packaged
}

type Heuristic = fn(&RepoShape) -> bool;

/// Evaluation order is part of the contract.
const HEURISTICS: &[(FrameworkLabel, Heuristic)] = &[
    (FrameworkLabel::MultiFramework, is_multi_framework),
    (FrameworkLabel::Nextjs, is_nextjs),
    (FrameworkLabel::React, is_react),
    (FrameworkLabel::Svelte, is_svelte),
    (FrameworkLabel::Flask, is_flask),
    (FrameworkLabel::Fastapi, is_fastapi),
    (FrameworkLabel::PythonCli, is_python_cli),
    (FrameworkLabel::PythonLib, is_python_lib),
];

/// Detect the framework of a repository from its listing.
pub fn detect_framework(files: &[FileDescriptor]) -> FrameworkLabel {
    let shape = RepoShape::new(files);
    let label = HEURISTICS
        .iter()
        .find(|(_, matches)| matches(&shape))
        .map(|(label, _)| *label)
        .unwrap_or(FrameworkLabel::Unknown);
    log::debug!("Detected framework {label} from {} entries", files.len());
    label
}
