//! The capability contract every language variant satisfies.

use std::path::Path;

use super::reader::{file_name, read_source};
use super::{aggregate, AnalysisResult, Behavior, Dependencies, Exports, Language};

/// Language-specific analyzer.
///
/// Implementations supply the three extraction stages; file and directory
/// analysis are provided on top of them. All stages run over the same text
/// and keep no state between calls, so analyzers can be shared freely
/// between threads.
pub trait LanguageAnalyzer: Send + Sync {
    /// The language this analyzer recognizes.
    fn language(&self) -> Language;

    /// Returns the language identifier (e.g., "go", "rust").
    fn language_id(&self) -> &'static str {
        self.language().id()
    }

    /// Returns file extensions this analyzer claims (without dot).
    fn file_extensions(&self) -> &'static [&'static str] {
        self.language().extensions()
    }

    /// Check if this analyzer handles the given file extension.
    /// A leading dot is accepted.
    fn handles_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.file_extensions().contains(&ext)
    }

    /// Exported functions, types and classes, in order of appearance.
    fn extract_exports(&self, content: &str) -> Exports;

    /// External and internal references, standard library excluded.
    fn extract_dependencies(&self, content: &str) -> Dependencies;

    /// Inferred success and error behaviors.
    fn extract_behaviors(&self, content: &str) -> Vec<Behavior>;

    /// Analyze already-loaded source text attributed to `path`.
    ///
    /// Empty text produces an empty result without any analyzed file.
    fn analyze_source(&self, path: &Path, content: &str) -> AnalysisResult {
        if content.is_empty() {
            return AnalysisResult::empty(path.display().to_string());
        }

        let result = AnalysisResult {
            path: path.display().to_string(),
            exports: self.extract_exports(content),
            dependencies: self.extract_dependencies(content),
            behaviors: self.extract_behaviors(content),
            analyzed_files: vec![file_name(path)],
        };

        tracing::trace!(
            path = %path.display(),
            language = self.language_id(),
            functions = result.exports.functions.len(),
            types = result.exports.types.len(),
            classes = result.exports.classes.len(),
            "analyzed file"
        );

        result
    }

    /// Analyze a single file. Never fails: unreadable input yields an empty
    /// result.
    fn analyze_file(&self, path: &Path) -> AnalysisResult {
        let content = read_source(path);
        self.analyze_source(path, &content)
    }

    /// Analyze the files of one directory and fold them into one result.
    ///
    /// With `files`, exactly those names (relative to `dir`) are analyzed in
    /// the given order. Otherwise every direct child file with a claimed
    /// extension is analyzed in enumeration order. Missing files are skipped.
    fn analyze_directory(&self, dir: &Path, files: Option<&[String]>) -> AnalysisResult {
        aggregate::analyze_directory(self, dir, files)
    }
}
