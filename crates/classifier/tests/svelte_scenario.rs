use pretty_assertions::assert_eq;
use repolens_classifier::{analyze_at, FileDescriptor, FrameworkLabel, RepositoryMetadata};

#[test]
fn sveltekit_listing_end_to_end() {
    let metadata = RepositoryMetadata::new("acme/kit-site", "main");
    let files = vec![
        FileDescriptor::blob("svelte.config.js", Some(300)),
        FileDescriptor::blob("src/routes/+page.svelte", Some(2_000)),
        FileDescriptor::blob("src/lib/components/Button.svelte", Some(800)),
        FileDescriptor::blob("README.md", Some(500)),
    ];

    let result = analyze_at(&metadata, &files, 1_700_000_000_000).expect("analysis");
    assert_eq!(result.framework, FrameworkLabel::Svelte);

    let subsystems: Vec<(&str, Vec<&str>)> = result
        .subsystems
        .iter()
        .map(|s| {
            (
                s.name.as_str(),
                s.member_paths.iter().map(String::as_str).collect(),
            )
        })
        .collect();
    // No Svelte rule covers root-level config files, so the config lands in Other.
    assert_eq!(
        subsystems,
        vec![
            ("Routes", vec!["src/routes/+page.svelte"]),
            ("Components", vec!["src/lib/components/Button.svelte"]),
            ("Documentation", vec!["README.md"]),
            ("Other", vec!["svelte.config.js"]),
        ]
    );

    let claimed: usize = result.subsystems.iter().map(|s| s.member_paths.len()).sum();
    assert_eq!(claimed, result.total_files);

    assert_eq!(result.main_files, vec!["README.md"]);
    assert_eq!(result.config_files, vec!["svelte.config.js"]);
    assert_eq!(result.doc_files, vec!["README.md"]);
    assert!(result.test_files.is_empty());
    assert_eq!(result.languages["Svelte"], 2_800);
    assert_eq!(result.languages["JavaScript"], 300);
    assert_eq!(result.languages["Markdown"], 500);
}

#[test]
fn result_serializes_with_kebab_case_framework() {
    let metadata = RepositoryMetadata::new("acme/cli", "main");
    let files = vec![
        FileDescriptor::blob("pyproject.toml", Some(10)),
        FileDescriptor::blob("acme/cli.py", Some(10)),
    ];
    let result = analyze_at(&metadata, &files, 5).expect("analysis");
    let json = serde_json::to_value(&result).expect("json");
    assert_eq!(json["framework"], "python-cli");
    assert_eq!(json["analyzed_at_ms"], 5);
    assert!(json.get("architecture_summary").is_none());
}
