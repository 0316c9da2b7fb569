//! Path and extension matching used by the rule tables.
//!
//! Matching is plain case-insensitive prefix/substring logic: no globbing and
//! no regular expressions.

/// `true` when `pattern` matches `path` at the root or at any directory boundary.
///
/// `"src/"` matches `src/app.ts` and `packages/web/src/app.ts`, but not
/// `mysrc/app.ts`. An empty pattern matches nothing.
pub fn matches_pattern(path: &str, pattern: &str) -> bool {
    matches_pattern_lc(&path.to_ascii_lowercase(), &pattern.to_ascii_lowercase())
}

/// `true` when `path` ends with `extension` (leading dot included), ignoring case.
pub fn matches_extension(path: &str, extension: &str) -> bool {
    matches_extension_lc(&path.to_ascii_lowercase(), &extension.to_ascii_lowercase())
}

/// Both arguments must already be lowercase.
pub(crate) fn matches_pattern_lc(path_lc: &str, pattern_lc: &str) -> bool {
    if pattern_lc.is_empty() {
        return false;
    }
    path_lc.starts_with(pattern_lc) || path_lc.contains(&format!("/{pattern_lc}"))
}

/// Both arguments must already be lowercase.
pub(crate) fn matches_extension_lc(path_lc: &str, extension_lc: &str) -> bool {
    !extension_lc.is_empty() && path_lc.ends_with(extension_lc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_matches_at_root_and_directory_boundaries() {
        assert!(matches_pattern("src/components/Button.tsx", "src/"));
        assert!(matches_pattern("packages/web/src/index.ts", "src/"));
        assert!(matches_pattern("SRC/App.tsx", "src/"));
        assert!(matches_pattern("README.md", "readme"));
        assert!(matches_pattern("docs/README.md", "readme"));
    }

    #[test]
    fn pattern_does_not_match_inside_a_segment() {
        assert!(!matches_pattern("mysrc/app.ts", "src/"));
        assert!(!matches_pattern("lib/pages.ts", "ages"));
        assert!(!matches_pattern("src/app.ts", ""));
    }

    #[test]
    fn pattern_checks_every_occurrence() {
        // First occurrence is mid-segment, second one sits on a boundary.
        assert!(matches_pattern("xtests/tests/a.py", "tests/"));
        // The boundary hit overlaps an earlier mid-segment hit.
        assert!(matches_pattern("xa/a/a/f", "a/a/"));
    }

    #[test]
    fn extension_is_case_insensitive_suffix() {
        assert!(matches_extension("src/App.TSX", ".tsx"));
        assert!(matches_extension("index.html", ".HTML"));
        assert!(!matches_extension("index.html", ".htm"));
        assert!(!matches_extension("index.html", ""));
    }
}
