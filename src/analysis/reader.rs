//! Source file loading.

use std::fs;
use std::path::Path;

/// Read a source file as UTF-8 text.
///
/// Missing files, permission problems and invalid UTF-8 all yield an empty
/// string. Analyzers treat empty content as "nothing to report".
pub fn read_source(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "source is not valid UTF-8");
                String::new()
            }
        },
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "failed to read source");
            String::new()
        }
    }
}

/// Base name of a path as an owned string (empty when there is none).
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
