//! Codebrief - heuristic source summaries.
//!
//! Codebrief extracts a structured summary from source files: exported
//! functions, types and classes, external and internal dependencies, and
//! inferred success/error behaviors. Six languages are supported:
//! TypeScript, Python, Go, Rust, Java and Kotlin.
//!
//! # Architecture
//!
//! - `analysis`: pattern-based language analyzers and the result model
//! - `config`: optional YAML configuration file
//! - `report`: output formatting (JSON, pretty)
//! - `cli`: the `codebrief` command line
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use codebrief::{analyzer_for_path, LanguageAnalyzer};
//!
//! let path = Path::new("src/token.go");
//! let analyzer = analyzer_for_path(path).unwrap();
//! let result = analyzer.analyze_file(path);
//! println!("{} functions", result.exports.functions.len());
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod report;

pub use analysis::{
    all_analyzers, analyzer_for, analyzer_for_language, analyzer_for_path, AnalysisResult,
    AnalyzerError, Behavior, BehaviorCategory, Dependencies, ExportedClass, ExportedFunction,
    ExportedType, Exports, Language, LanguageAnalyzer,
};
pub use config::Config;
