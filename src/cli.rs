//! Command-line interface for codebrief.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{
    analyzer_for, analyzer_for_language, AnalysisResult, Language, LanguageAnalyzer,
};
use crate::config::{self, Config};
use crate::report::{self, Format};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Heuristic source summaries for TypeScript, Python, Go, Rust, Java and Kotlin.
///
/// Codebrief reports what a file or directory exports, which modules it
/// depends on, and which success and error outcomes it appears to produce.
/// Extraction is pattern-based: no code is compiled or executed.
#[derive(Parser)]
#[command(name = "codebrief")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a source file or directory
    Analyze(AnalyzeArgs),
    /// List supported languages and their file extensions
    Languages,
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Language id (default: inferred from file extensions)
    #[arg(short, long, env = "CODEBRIEF_LANGUAGE")]
    pub language: Option<String>,

    /// Analyze only these files of the directory, in order
    #[arg(long, num_args = 1..)]
    pub files: Vec<String>,

    /// Output format: json or pretty
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Load the explicit config, or a discovered one from the working directory.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => config::discover(Path::new(".")),
    };

    let Some(path) = path else {
        return Ok(Config::default());
    };

    tracing::debug!(config = %path.display(), "loading config");
    let config = Config::parse_file(&path)?;
    config::validate(&config)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Resolve the language: flag, then config, then the path itself.
fn resolve_language(
    args: &AnalyzeArgs,
    config: &Config,
    files: Option<&[String]>,
) -> anyhow::Result<Language> {
    if let Some(id) = args.language.as_deref().or(config.language.as_deref()) {
        return Ok(analyzer_for_language(id)?.language());
    }

    if args.path.is_dir() {
        return infer_directory_language(&args.path, files).with_context(|| {
            format!(
                "cannot infer a language for {}; pass --language",
                args.path.display()
            )
        });
    }

    Language::from_path(&args.path).with_context(|| {
        format!(
            "unsupported file extension for {}; pass --language",
            args.path.display()
        )
    })
}

/// Language of the first claimed file in the explicit list, or else among
/// the directory's children in sorted name order.
fn infer_directory_language(dir: &Path, files: Option<&[String]>) -> Option<Language> {
    if let Some(names) = files.filter(|f| !f.is_empty()) {
        return names
            .iter()
            .find_map(|name| Language::from_path(Path::new(name)));
    }

    let mut children: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    children.sort();
    children.iter().find_map(|path| Language::from_path(path))
}

/// Run analysis for the given path with a specific analyzer.
fn analyze(
    analyzer: &dyn LanguageAnalyzer,
    path: &Path,
    files: Option<&[String]>,
) -> AnalysisResult {
    if path.is_dir() {
        analyzer.analyze_directory(path, files)
    } else {
        if files.is_some() {
            tracing::warn!(path = %path.display(), "--files ignored for a single file");
        }
        analyzer.analyze_file(path)
    }
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if !args.path.exists() {
        eprintln!("Error: path does not exist: {}", args.path.display());
        return Ok(EXIT_ERROR);
    }

    let config = load_config(args.config.as_deref())?;

    let files: Option<Vec<String>> = if args.files.is_empty() {
        config.files.clone()
    } else {
        Some(args.files.clone())
    };
    let files = files.as_deref();

    let format: Format = match args.format.as_deref().or(config.format.as_deref()) {
        Some(f) => f.parse()?,
        None => Format::default(),
    };

    let language = resolve_language(args, &config, files)?;
    tracing::debug!(
        path = %args.path.display(),
        language = language.id(),
        format = format.as_str(),
        "starting analysis"
    );

    let result = analyze(analyzer_for(language), &args.path, files);

    match &args.output {
        Some(output) => {
            colored::control::set_override(false);
            let rendered = report::render(&result, format)?;
            fs::write(output, rendered)
                .with_context(|| format!("failed to write {}", output.display()))?;
            eprintln!("Wrote {}", output.display());
        }
        None => print!("{}", report::render(&result, format)?),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the languages command.
pub fn run_languages() -> anyhow::Result<i32> {
    println!("Supported languages:");
    println!();
    for lang in Language::ALL {
        let extensions: Vec<String> = lang.extensions().iter().map(|e| format!(".{}", e)).collect();
        println!("  {:<12} {}", lang.id(), extensions.join(", "));
    }
    Ok(EXIT_SUCCESS)
}
