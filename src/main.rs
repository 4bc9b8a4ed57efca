//! Domain Sift - classify domain lists by dictionary words and brandability
//!
//! Feed it exported domain lists (.txt, .csv, or a single .zip of them) and it
//! writes the matching `.com` and other domains to two result files.

use chrono::Utc;
use clap::{Parser, ValueEnum};
use domain_sift::{
    select_splitter,
    sift::{output::preview, RunReport},
    BrandSettings, Dictionary, DomainSiftError, MatchMode, Result, SiftMode, Sifter, Upload,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// How many entries of each bucket to show after a run
const PREVIEW_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Label is a dictionary word
    Exact,
    /// Word, hyphenated combo or two-word concatenation
    Broad,
    /// Invented, pronounceable names scored by phonetic heuristics
    Brandables,
}

#[derive(Parser, Debug)]
#[command(
    name = "domain-sift",
    about = "Sift domain lists for dictionary words, word combos and brandable names",
    version,
    long_about = None
)]
struct Args {
    /// Input files (.txt, .csv, or a single .zip containing them)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Word list, one word per line
    #[arg(short, long, env = "DOMAIN_SIFT_WORDLIST", default_value = "words_alpha.txt")]
    wordlist: PathBuf,

    /// What to look for
    #[arg(short, long, value_enum, default_value = "exact")]
    mode: ModeArg,

    /// Directory for the result files
    #[arg(short, long, env = "DOMAIN_SIFT_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// JSON file with brandable settings (flags below override it)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Minimum brandable score
    #[arg(long, allow_negative_numbers = true)]
    score_threshold: Option<i32>,

    #[arg(long)]
    min_len: Option<usize>,

    #[arg(long)]
    max_len: Option<usize>,

    /// Lower bound of the vowel ratio
    #[arg(long)]
    vowel_min: Option<f64>,

    /// Upper bound of the vowel ratio
    #[arg(long)]
    vowel_max: Option<f64>,

    /// Consonant run length that starts to cost points (min 2)
    #[arg(long)]
    max_consonant_run: Option<usize>,

    #[arg(long)]
    min_unique_chars: Option<usize>,

    /// Maximum count of q/x/z/j (0-2)
    #[arg(long)]
    max_rare_letters: Option<usize>,

    /// Allowed C/V patterns, comma separated (e.g. CVCVC,CVCCV)
    #[arg(long, value_delimiter = ',')]
    allowed_patterns: Vec<String>,

    /// Keep stuttering labels like "kakaka"
    #[arg(long)]
    allow_repeats: bool,

    /// Keep labels that are plain dictionary words
    #[arg(long)]
    allow_dictionary_words: bool,

    /// Skip the q/x edge and ugly letter pair rules
    #[arg(long)]
    relaxed: bool,

    /// Write bare domains instead of domain/score/pattern columns
    #[arg(long)]
    no_scores: bool,

    /// Use naive last-dot suffix splitting instead of the public suffix list
    #[arg(long)]
    naive_suffix: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = domain_sift::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("{}", e.user_message());
        if e.is_fatal_startup() {
            eprintln!("⛔ Run aborted before scanning");
        }
        process::exit(1);
    }
}

fn setup_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main sift workflow
fn run(args: &Args) -> Result<()> {
    let started_at = Utc::now();

    // Missing word list stops the run before anything is scanned
    let words = Dictionary::shared(&args.wordlist)?;
    println!("📚 Word list loaded: {} words", words.len());

    let mode = build_mode(args)?;
    let include_score = match &mode {
        SiftMode::Brandables(settings) => settings.include_score,
        SiftMode::Match(_) => false,
    };

    let uploads = read_uploads(&args.inputs)?;
    let files = domain_sift::collect_inputs(uploads)?;
    if files.is_empty() {
        println!("⚠️  No valid .csv/.txt files (or the zip contained none).");
        return Ok(());
    }
    println!("📂 Files to process: {} (alphabetical order)", files.len());

    let splitter = select_splitter(args.naive_suffix);
    let sifter = Sifter::new(&words, splitter.as_ref(), mode);

    let bar = progress_bar(args.no_progress);
    let outcome = sifter.run(&files, |progress| {
        bar.set_position((progress.fraction() * 1000.0) as u64);
        bar.set_message(progress.status_line());
    });
    bar.finish_and_clear();

    std::fs::create_dir_all(&args.out_dir).map_err(|e| {
        DomainSiftError::io(e.to_string(), Some(args.out_dir.to_string_lossy().to_string()))
    })?;
    for buffer in outcome.results.buffers(include_score) {
        let path = args.out_dir.join(buffer.file_name());
        write_file(&path, &buffer.data)?;
        tracing::info!(path = %path.display(), bytes = buffer.data.len(), "Results written");
    }

    if let Some(report_path) = &args.report {
        let report = RunReport::new(
            sifter.mode().label(),
            splitter.name(),
            &files,
            &outcome,
            started_at,
        );
        report.save(report_path)?;
    }

    println!();
    println!("📈 Summary:");
    println!("   📂 Files processed: {}", outcome.processed_files);
    println!("   📊 Records processed: {}", outcome.processed_records);
    println!("   🌐 .com found: {}", outcome.results.com_count());
    println!("   🌍 Others found: {}", outcome.results.others_count());

    print_preview(".com", &outcome.results.com_domains());
    print_preview("others", &outcome.results.others_domains());

    Ok(())
}

/// Resolve the run mode, merging a settings file with flag overrides
fn build_mode(args: &Args) -> Result<SiftMode> {
    match args.mode {
        ModeArg::Exact => Ok(SiftMode::Match(MatchMode::Exact)),
        ModeArg::Broad => Ok(SiftMode::Match(MatchMode::Broad)),
        ModeArg::Brandables => {
            let mut settings = match &args.settings {
                Some(path) => load_settings(path)?,
                None => BrandSettings::default(),
            };

            if let Some(v) = args.score_threshold {
                settings.score_threshold = v;
            }
            if let Some(v) = args.min_len {
                settings.min_len = v;
            }
            if let Some(v) = args.max_len {
                settings.max_len = v;
            }
            if let Some(v) = args.vowel_min {
                settings.vowel_min = v;
            }
            if let Some(v) = args.vowel_max {
                settings.vowel_max = v;
            }
            if let Some(v) = args.max_consonant_run {
                settings.max_consonant_run = v;
            }
            if let Some(v) = args.min_unique_chars {
                settings.min_unique_chars = v;
            }
            if let Some(v) = args.max_rare_letters {
                settings.max_rare_letters = v;
            }
            if !args.allowed_patterns.is_empty() {
                settings.allowed_run_patterns = args.allowed_patterns.iter().cloned().collect();
            }
            if let Some(bad) = settings
                .allowed_run_patterns
                .iter()
                .find(|p| p.is_empty() || !p.chars().all(|c| matches!(c, 'C' | 'V' | 'c' | 'v')))
            {
                return Err(domain_sift::validation_error!(
                    "allowed pattern '{}' may only contain C and V",
                    bad
                ));
            }
            if args.allow_repeats {
                settings.reject_repeats = false;
            }
            if args.allow_dictionary_words {
                settings.reject_dictionary_words = false;
            }
            if args.relaxed {
                settings.strict_brandables = false;
            }
            if args.no_scores {
                settings.include_score = false;
            }

            if !(0.0..=1.0).contains(&settings.vowel_min) || !(0.0..=1.0).contains(&settings.vowel_max) {
                return Err(domain_sift::config_error!(
                    "vowel ratio bounds must be between 0 and 1 (got {} and {})",
                    settings.vowel_min,
                    settings.vowel_max
                ));
            }

            Ok(SiftMode::Brandables(settings.normalized()))
        }
    }
}

fn load_settings(path: &Path) -> Result<BrandSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        DomainSiftError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        DomainSiftError::parse(format!("{}: {}", path.display(), e), Some(content.clone()))
    })
}

fn read_uploads(paths: &[PathBuf]) -> Result<Vec<Upload>> {
    paths
        .iter()
        .map(|path| {
            let data = std::fs::read(path).map_err(|e| {
                DomainSiftError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
            })?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.to_string_lossy().to_string());
            Ok(Upload::new(name, data))
        })
        .collect()
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data)
        .map_err(|e| DomainSiftError::io(e.to_string(), Some(path.to_string_lossy().to_string())))
}

fn progress_bar(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(1000);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:40}] {percent:>3}% {wide_msg}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

fn print_preview(title: &str, domains: &[&str]) {
    if domains.is_empty() {
        return;
    }
    println!();
    println!("🔎 {} (first {}):", title, PREVIEW_LIMIT.min(domains.len()));
    println!("{}", preview(domains, PREVIEW_LIMIT));
}
