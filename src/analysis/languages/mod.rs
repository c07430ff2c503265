//! Language-specific analyzer implementations.
//!
//! Each module is a pattern table plus a visibility predicate, a doc comment
//! style and an error vocabulary; the extraction helpers in the parent module
//! do the rest.

mod go;
mod java;
mod kotlin;
mod python;
mod rust_lang;
mod typescript;

pub use go::GoAnalyzer;
pub use java::JavaAnalyzer;
pub use kotlin::KotlinAnalyzer;
pub use python::PythonAnalyzer;
pub use rust_lang::RustAnalyzer;
pub use typescript::TypeScriptAnalyzer;

use std::fmt;
use std::path::Path;

use once_cell::sync::OnceCell;

use super::{AnalyzerError, LanguageAnalyzer};

/// The six supported source languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    Python,
    Go,
    Rust,
    Java,
    Kotlin,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::TypeScript,
        Language::Python,
        Language::Go,
        Language::Rust,
        Language::Java,
        Language::Kotlin,
    ];

    /// Lowercase identifier used on the command line and in config files.
    pub fn id(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Java => "java",
            Language::Kotlin => "kotlin",
        }
    }

    /// File extensions claimed by this language (without dot).
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::TypeScript => &["ts", "tsx"],
            Language::Python => &["py"],
            Language::Go => &["go"],
            Language::Rust => &["rs"],
            Language::Java => &["java"],
            Language::Kotlin => &["kt", "kts"],
        }
    }

    /// Parse a language id. Matching is case-insensitive and accepts the
    /// usual short forms (`ts`, `py`, `rs`, `kt`).
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Some(Language::TypeScript),
            "python" | "py" => Some(Language::Python),
            "go" | "golang" => Some(Language::Go),
            "rust" | "rs" => Some(Language::Rust),
            "java" => Some(Language::Java),
            "kotlin" | "kt" => Some(Language::Kotlin),
            _ => None,
        }
    }

    /// Find the language claiming `ext` (a leading dot is accepted).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.');
        Language::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext))
    }

    /// Find the language claiming the extension of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Language::from_extension)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Static storage for TypeScript analyzer.
static TYPESCRIPT_ANALYZER: OnceCell<TypeScriptAnalyzer> = OnceCell::new();

/// Static storage for Python analyzer.
static PYTHON_ANALYZER: OnceCell<PythonAnalyzer> = OnceCell::new();

/// Static storage for Go analyzer.
static GO_ANALYZER: OnceCell<GoAnalyzer> = OnceCell::new();

/// Static storage for Rust analyzer.
static RUST_ANALYZER: OnceCell<RustAnalyzer> = OnceCell::new();

/// Static storage for Java analyzer.
static JAVA_ANALYZER: OnceCell<JavaAnalyzer> = OnceCell::new();

/// Static storage for Kotlin analyzer.
static KOTLIN_ANALYZER: OnceCell<KotlinAnalyzer> = OnceCell::new();

/// Get the shared analyzer for `lang`.
pub fn analyzer_for(lang: Language) -> &'static dyn LanguageAnalyzer {
    match lang {
        Language::TypeScript => TYPESCRIPT_ANALYZER.get_or_init(TypeScriptAnalyzer::new),
        Language::Python => PYTHON_ANALYZER.get_or_init(PythonAnalyzer::new),
        Language::Go => GO_ANALYZER.get_or_init(GoAnalyzer::new),
        Language::Rust => RUST_ANALYZER.get_or_init(RustAnalyzer::new),
        Language::Java => JAVA_ANALYZER.get_or_init(JavaAnalyzer::new),
        Language::Kotlin => KOTLIN_ANALYZER.get_or_init(KotlinAnalyzer::new),
    }
}

/// Get an analyzer by language ID.
pub fn analyzer_for_language(id: &str) -> Result<&'static dyn LanguageAnalyzer, AnalyzerError> {
    Language::from_id(id)
        .map(analyzer_for)
        .ok_or_else(|| AnalyzerError::UnsupportedLanguage(id.to_string()))
}

/// Get an analyzer for the extension of `path`.
pub fn analyzer_for_path(path: &Path) -> Result<&'static dyn LanguageAnalyzer, AnalyzerError> {
    Language::from_path(path)
        .map(analyzer_for)
        .ok_or_else(|| {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            AnalyzerError::UnsupportedExtension(ext)
        })
}

/// All analyzers, in [`Language::ALL`] order.
pub fn all_analyzers() -> Vec<&'static dyn LanguageAnalyzer> {
    Language::ALL.into_iter().map(analyzer_for).collect()
}
