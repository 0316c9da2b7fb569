use pretty_assertions::assert_eq;
use repolens_classifier::{
    classify_subsystems, classify_with_rules, detect_framework, FileDescriptor, FrameworkLabel,
    SubsystemRule,
};
use std::collections::HashSet;

fn mixed_listing() -> Vec<FileDescriptor> {
    let blobs = [
        "README.md",
        "CHANGELOG.md",
        "package.json",
        "pyproject.toml",
        "requirements.txt",
        "next.config.mjs",
        "svelte.config.js",
        "app.py",
        "main.py",
        "pkg/__main__.py",
        "pkg/cli.py",
        "pkg/commands/run.py",
        "app/page.tsx",
        "app/api/health/route.ts",
        "pages/index.jsx",
        "pages/api/users.ts",
        "src/routes/+page.svelte",
        "src/lib/components/Button.svelte",
        "src/lib/stores/session.ts",
        "src/components/Card.tsx",
        "src/components/Card.module.css",
        "src/hooks/useAuth.ts",
        "src/index.css",
        "routers/items.py",
        "schemas/item.py",
        "models/user.py",
        "templates/base.html",
        "templates/partial.txt",
        "static/logo.png",
        "public/favicon.ico",
        "migrations/0001_init.py",
        "examples/react-demo/index.jsx",
        "examples/vue-demo/App.vue",
        "examples/solid-demo/index.tsx",
        "tests/test_items.py",
        "__tests__/card.test.tsx",
        "docs/guide.md",
        "docs/diagram.svg",
        "Dockerfile",
        "LICENSE",
    ];
    let mut files: Vec<FileDescriptor> = blobs
        .iter()
        .enumerate()
        .map(|(i, p)| FileDescriptor::blob(*p, Some(100 + i as u64)))
        .collect();
    files.push(FileDescriptor::tree("src"));
    files.push(FileDescriptor::tree("src/routes"));
    files
}

fn assert_partition(files: &[FileDescriptor], label: FrameworkLabel) {
    let subsystems = classify_subsystems(files, label);
    let mut seen = HashSet::new();
    for subsystem in &subsystems {
        assert!(
            !subsystem.member_paths.is_empty(),
            "{label}: empty subsystem {}",
            subsystem.name
        );
        for path in &subsystem.member_paths {
            assert!(seen.insert(path.clone()), "{label}: {path} assigned twice");
        }
    }
    let expected: HashSet<String> = files
        .iter()
        .filter(|f| f.is_blob())
        .map(|f| f.path.clone())
        .collect();
    assert_eq!(seen, expected, "{label}: partition mismatch");
}

#[test]
fn every_rule_table_partitions_blobs_exactly() {
    let files = mixed_listing();
    for label in FrameworkLabel::ALL {
        assert_partition(&files, label);
    }
}

#[test]
fn other_bucket_is_last_and_only_when_needed() {
    let files = mixed_listing();
    for label in FrameworkLabel::ALL {
        let subsystems = classify_subsystems(&files, label);
        let other_positions: Vec<usize> = subsystems
            .iter()
            .enumerate()
            .filter(|(_, s)| s.name == "Other")
            .map(|(i, _)| i)
            .collect();
        assert!(other_positions.len() <= 1, "{label}");
        if let Some(pos) = other_positions.first() {
            assert_eq!(*pos, subsystems.len() - 1, "{label}: Other is not last");
        }
    }
}

#[test]
fn detection_and_classification_are_deterministic() {
    let files = mixed_listing();
    let first = detect_framework(&files);
    assert_eq!(first, detect_framework(&files));
    assert_eq!(
        classify_subsystems(&files, first),
        classify_subsystems(&files, first)
    );
}

#[test]
fn same_shape_same_label() {
    let a = vec![
        FileDescriptor::blob("package.json", Some(1)),
        FileDescriptor::blob("src/App.jsx", Some(1)),
    ];
    let b = vec![
        FileDescriptor::blob("package.json", Some(999)),
        FileDescriptor::blob("src/App.jsx", None),
    ];
    assert_eq!(detect_framework(&a), detect_framework(&b));
}

#[test]
fn multi_framework_listing_is_detected_first() {
    assert_eq!(detect_framework(&mixed_listing()), FrameworkLabel::MultiFramework);
}

#[test]
fn priority_beats_specificity() {
    const RULES: &[SubsystemRule] = &[
        SubsystemRule {
            name: "B",
            description: "components",
            path_patterns: &["src/components/"],
            allowed_extensions: None,
            priority: 2,
        },
        SubsystemRule {
            name: "A",
            description: "sources",
            path_patterns: &["src/"],
            allowed_extensions: None,
            priority: 1,
        },
    ];
    let files = vec![FileDescriptor::blob("src/components/Button.tsx", Some(10))];
    let out = classify_with_rules(&files, RULES);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "A");
    assert_eq!(out[0].matched_pattern_summary, "src/");
}

#[test]
fn five_files_two_rules_three_subsystems() {
    const RULES: &[SubsystemRule] = &[
        SubsystemRule {
            name: "Api",
            description: "",
            path_patterns: &["api/"],
            allowed_extensions: None,
            priority: 1,
        },
        SubsystemRule {
            name: "Web",
            description: "",
            path_patterns: &["web/"],
            allowed_extensions: None,
            priority: 2,
        },
    ];
    let files: Vec<FileDescriptor> = ["api/a.go", "web/a.ts", "api/b.go", "web/b.ts", "tools/x.sh"]
        .iter()
        .map(|p| FileDescriptor::blob(*p, None))
        .collect();
    let out = classify_with_rules(&files, RULES);
    let shape: Vec<(&str, usize)> = out
        .iter()
        .map(|s| (s.name.as_str(), s.member_paths.len()))
        .collect();
    assert_eq!(shape, vec![("Api", 2), ("Web", 2), ("Other", 1)]);
}
