//! Directory-level aggregation.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use super::reader::file_name;
use super::{AnalysisResult, LanguageAnalyzer};

/// Analyze the target files of `dir` and fold their results.
///
/// Files are analyzed in parallel, but folded strictly in target order so
/// concatenation and dependency dedup stay deterministic.
pub fn analyze_directory<A>(analyzer: &A, dir: &Path, files: Option<&[String]>) -> AnalysisResult
where
    A: LanguageAnalyzer + ?Sized,
{
    let targets = match files {
        Some(names) if !names.is_empty() => names.iter().map(|n| dir.join(n)).collect(),
        _ => enumerate_sources(analyzer, dir),
    };

    let per_file: Vec<Option<AnalysisResult>> = targets
        .par_iter()
        .map(|path| {
            if !path.exists() {
                tracing::debug!(path = %path.display(), "skipping missing target");
                return None;
            }
            let mut result = analyzer.analyze_file(path);
            result.analyzed_files = vec![file_name(path)];
            Some(result)
        })
        .collect();

    let mut aggregate = AnalysisResult::empty(dir.display().to_string());
    for result in per_file.into_iter().flatten() {
        aggregate.absorb(result);
    }

    tracing::debug!(
        dir = %dir.display(),
        language = analyzer.language_id(),
        files = aggregate.analyzed_files.len(),
        "analyzed directory"
    );

    aggregate
}

/// Direct (non-recursive) child files of `dir` that `analyzer` claims,
/// in file name order.
pub fn enumerate_sources<A>(analyzer: &A, dir: &Path) -> Vec<PathBuf>
where
    A: LanguageAnalyzer + ?Sized,
{
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "cannot list entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|ext| analyzer.handles_extension(ext))
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Behavior, Dependencies, ExportedFunction, Exports, Language};
    use std::fs;
    use tempfile::TempDir;

    /// Reports every line starting with `fn ` as a function and every
    /// `dep ` line as an external dependency.
    struct LineAnalyzer;

    impl LanguageAnalyzer for LineAnalyzer {
        fn language(&self) -> Language {
            Language::Go
        }

        fn extract_exports(&self, content: &str) -> Exports {
            let functions = content
                .lines()
                .filter_map(|l| l.strip_prefix("fn "))
                .map(|name| ExportedFunction {
                    name: name.to_string(),
                    signature: format!("{}()", name),
                    description: String::new(),
                })
                .collect();
            Exports {
                functions,
                ..Default::default()
            }
        }

        fn extract_dependencies(&self, content: &str) -> Dependencies {
            let mut deps = Dependencies::default();
            for dep in content.lines().filter_map(|l| l.strip_prefix("dep ")) {
                deps.add_external(dep);
            }
            deps
        }

        fn extract_behaviors(&self, _content: &str) -> Vec<Behavior> {
            Vec::new()
        }
    }

    fn names(result: &AnalysisResult) -> Vec<&str> {
        result
            .exports
            .functions
            .iter()
            .map(|f| f.name.as_str())
            .collect()
    }

    #[test]
    fn test_explicit_list_order_and_skips() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.go"), "fn Bar\ndep github.com/x/y\n").unwrap();
        fs::write(temp.path().join("a.go"), "fn Foo\ndep github.com/x/y\n").unwrap();

        let files = vec![
            "b.go".to_string(),
            "missing.go".to_string(),
            "a.go".to_string(),
        ];
        let result = LineAnalyzer.analyze_directory(temp.path(), Some(files.as_slice()));

        assert_eq!(result.analyzed_files, vec!["b.go", "a.go"]);
        assert_eq!(names(&result), vec!["Bar", "Foo"]);
        assert_eq!(result.dependencies.external, vec!["github.com/x/y"]);
        assert_eq!(result.path, temp.path().display().to_string());
    }

    #[test]
    fn test_explicit_directory_entry_counts_as_analyzed() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("a.go"), "fn Foo\n").unwrap();

        let files = vec!["nested".to_string(), "a.go".to_string()];
        let result = LineAnalyzer.analyze_directory(temp.path(), Some(files.as_slice()));

        assert_eq!(result.analyzed_files, vec!["nested", "a.go"]);
        assert_eq!(names(&result), vec!["Foo"]);
    }

    #[test]
    fn test_explicit_list_ignores_extensions() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("notes.txt"), "fn Notes\n").unwrap();

        let files = vec!["notes.txt".to_string()];
        let result = LineAnalyzer.analyze_directory(temp.path(), Some(files.as_slice()));

        assert_eq!(result.analyzed_files, vec!["notes.txt"]);
        assert_eq!(names(&result), vec!["Notes"]);
    }

    #[test]
    fn test_enumeration_filters_extensions_and_subdirs() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.go"), "fn Foo\n").unwrap();
        fs::write(temp.path().join("README.md"), "fn Readme\n").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub").join("c.go"), "fn Nested\n").unwrap();

        let result = LineAnalyzer.analyze_directory(temp.path(), None);

        assert_eq!(result.analyzed_files, vec!["a.go"]);
        assert_eq!(names(&result), vec!["Foo"]);
    }

    #[test]
    fn test_empty_file_still_counts_as_analyzed() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("empty.go"), "").unwrap();

        let result = LineAnalyzer.analyze_directory(temp.path(), None);

        assert_eq!(result.analyzed_files, vec!["empty.go"]);
        assert!(result.exports.is_empty());
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let result = LineAnalyzer.analyze_directory(&temp.path().join("nope"), None);

        assert!(result.analyzed_files.is_empty());
        assert!(result.exports.is_empty());
        assert!(result.dependencies.is_empty());
    }
}
