//! Heuristic source analysis.
//!
//! Every supported language is described by a table of surface-syntax
//! patterns. An analyzer runs three independent passes over the same text
//! and assembles an [`AnalysisResult`]:
//!
//! ```text
//! ┌──────────────┐     ┌────────────────────┐     ┌────────────────┐
//! │ Source text  │────▶│ exports            │────▶│ AnalysisResult │
//! │ (reader)     │     │ dependencies       │     │ (per file)     │
//! └──────────────┘     │ behaviors          │     └────────────────┘
//!                      └────────────────────┘             │
//!                                                         ▼
//!                                                 ┌────────────────┐
//!                                                 │ aggregate      │
//!                                                 │ (per directory)│
//!                                                 └────────────────┘
//! ```
//!
//! Nothing here builds a syntax tree or resolves symbols; malformed input is
//! matched on a best-effort basis.
//!
//! # Adding a New Language
//!
//! 1. Add a variant to [`Language`] with its id and extensions
//! 2. Create a module in `src/analysis/languages/` with its pattern tables
//! 3. Implement `LanguageAnalyzer` using the helpers in `text` and `behavior`
//! 4. Register the analyzer in `languages/mod.rs`

mod aggregate;
mod behavior;
mod builder;
mod error;
mod languages;
mod model;
mod reader;
mod stdlib;
mod text;
mod traits;

pub use aggregate::enumerate_sources;
pub use builder::ExportsBuilder;
pub use error::AnalyzerError;
pub use languages::{
    all_analyzers, analyzer_for, analyzer_for_language, analyzer_for_path, GoAnalyzer,
    JavaAnalyzer, KotlinAnalyzer, Language, PythonAnalyzer, RustAnalyzer, TypeScriptAnalyzer,
};
pub use model::{
    AnalysisResult, Behavior, BehaviorCategory, Dependencies, ExportedClass, ExportedFunction,
    ExportedType, Exports,
};
pub use reader::read_source;
pub use traits::LanguageAnalyzer;
