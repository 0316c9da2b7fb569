use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use repolens_cache::{CacheConfig, CacheManager, JsonFileSnapshotStore};
use repolens_classifier::{
    analyze_snapshot, detect_framework, rules_for, AnalysisResult, FrameworkLabel, SubsystemRule,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

mod input;

#[derive(Parser)]
#[command(name = "repolens")]
#[command(about = "Classify repository layouts into frameworks and subsystems", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Where the cache snapshot is stored between runs
    #[arg(long, global = true, default_value = ".repolens/cache.json")]
    cache_file: PathBuf,

    /// Keep the cache in memory only (nothing is loaded or saved)
    #[arg(long, global = true)]
    no_cache: bool,

    /// Combined cache budget in bytes (overrides REPOLENS_CACHE_MAX_BYTES)
    #[arg(long, global = true)]
    max_cache_bytes: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a repository snapshot (JSON file, or `-` for stdin)
    Analyze(InputArgs),

    /// Print only the detected framework of a repository snapshot
    Detect(InputArgs),

    /// Show the subsystem rule table of one framework, or of all of them
    Rules(RulesArgs),

    /// Inspect or reset the cache
    #[command(subcommand)]
    Cache(CacheCommand),

    /// Store or read a short repository description
    #[command(subcommand)]
    Describe(DescribeCommand),
}

#[derive(Args)]
struct InputArgs {
    /// Path to a snapshot document, or `-` for stdin
    input: PathBuf,
}

#[derive(Args)]
struct RulesArgs {
    /// Framework label (e.g. nextjs, python-cli); all tables when omitted
    framework: Option<FrameworkLabel>,
}

#[derive(Subcommand)]
enum CacheCommand {
    /// Entry counts and byte usage
    Stats,
    /// Drop every entry and delete the snapshot file
    Clear,
}

#[derive(Subcommand)]
enum DescribeCommand {
    /// Store a description under KEY
    Set { key: String, text: String },
    /// Print the description under KEY (null when missing)
    Get { key: String },
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    cache_hit: bool,
    analysis: &'a AnalysisResult,
}

#[derive(Serialize)]
struct RuleTable {
    framework: FrameworkLabel,
    rules: &'static [SubsystemRule],
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let mut cache_cfg = CacheConfig::from_env();
    if let Some(max) = cli.max_cache_bytes {
        cache_cfg = cache_cfg.with_max_total_bytes(max.max(1));
    }

    let open = |config| open_cache(cli.no_cache, &cli.cache_file, config);
    match cli.command {
        Commands::Analyze(args) => run_analyze(&args, open(cache_cfg)),
        Commands::Detect(args) => run_detect(&args),
        Commands::Rules(args) => run_rules(&args),
        Commands::Cache(cmd) => run_cache(cmd, open(cache_cfg)),
        Commands::Describe(cmd) => run_describe(cmd, open(cache_cfg)),
    }
}

fn open_cache(no_cache: bool, cache_file: &Path, config: CacheConfig) -> CacheManager {
    if no_cache {
        log::debug!("Cache persistence disabled");
        return CacheManager::new(config);
    }
    let store = JsonFileSnapshotStore::new(cache_file);
    CacheManager::init(config, Box::new(store))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{output}");
    Ok(())
}

fn run_analyze(args: &InputArgs, mut cache: CacheManager) -> Result<()> {
    let snapshot = input::read_snapshot(&args.input)?;
    let key = snapshot.cache_key();

    if let Some(cached) = cache.get_analysis(&key) {
        log::info!("Cache hit for {key}");
        print_json(&AnalyzeOutput {
            cache_hit: true,
            analysis: cached,
        })?;
        cache.dispose();
        return Ok(());
    }

    let analysis = analyze_snapshot(&snapshot)
        .with_context(|| format!("Failed to analyze {}", snapshot.metadata.full_name))?;
    print_json(&AnalyzeOutput {
        cache_hit: false,
        analysis: &analysis,
    })?;

    cache.put_repository(key.clone(), snapshot);
    cache.put_analysis(key, analysis);
    cache.dispose();
    Ok(())
}

fn run_detect(args: &InputArgs) -> Result<()> {
    let snapshot = input::read_snapshot(&args.input)?;
    let framework = detect_framework(&snapshot.files);
    print_json(&serde_json::json!({ "framework": framework }))
}

fn run_rules(args: &RulesArgs) -> Result<()> {
    let table = |framework: FrameworkLabel| RuleTable {
        framework,
        rules: rules_for(framework),
    };
    match args.framework {
        Some(framework) => print_json(&table(framework)),
        None => {
            let tables: Vec<RuleTable> = FrameworkLabel::ALL.into_iter().map(table).collect();
            print_json(&tables)
        }
    }
}

fn run_cache(cmd: CacheCommand, mut cache: CacheManager) -> Result<()> {
    match cmd {
        CacheCommand::Stats => print_json(&cache.stats()),
        CacheCommand::Clear => {
            cache.clear();
            print_json(&serde_json::json!({ "cleared": true }))
        }
    }
}

fn run_describe(cmd: DescribeCommand, mut cache: CacheManager) -> Result<()> {
    match cmd {
        DescribeCommand::Set { key, text } => {
            let stored = cache.put_description(key.clone(), text);
            cache.dispose();
            print_json(&serde_json::json!({ "key": key, "stored": stored }))
        }
        DescribeCommand::Get { key } => {
            let description = cache.get_description(&key).map(str::to_string);
            cache.dispose();
            print_json(&description)
        }
    }
}
