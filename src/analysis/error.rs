//! Errors raised when choosing a language analyzer.

use thiserror::Error;

/// Failure to map a language id or a path to an analyzer.
///
/// Analysis itself never fails; only the lookup does.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("unsupported language: {0} (expected one of typescript, python, go, rust, java, kotlin)")]
    UnsupportedLanguage(String),

    #[error("no analyzer claims extension {0:?}")]
    UnsupportedExtension(String),
}
