//! Rust language analyzer.
//!
//! Only items carrying a bare `pub` are exported; `pub(crate)`, `pub(super)`
//! and `pub(in ...)` are treated as private. Dependencies come from `use`
//! declarations, `extern crate` and path-qualified derives.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::behavior::{collect_identifiers, infer_errors, ErrorVocabulary};
use crate::analysis::stdlib::is_stdlib;
use crate::analysis::text::{
    collapse_whitespace, describe, group, simplify_params, span, DocStyle,
};
use crate::analysis::{
    Behavior, Dependencies, Exports, ExportsBuilder, Language, LanguageAnalyzer,
};

const DOC: DocStyle = DocStyle::LineRun {
    prefix: "///",
    skip: &["#[", "//"],
};

const ERRORS: ErrorVocabulary = ErrorVocabulary {
    expired: "Error::Expired",
    invalid: "Error::Invalid",
    text_fallback: false,
};

lazy_static! {
    static ref FUNCTION_RE: Regex = Regex::new(
        r#"(?m)^[ \t]*pub(\s*\([^)]*\))?\s+(?:(?:const|async|unsafe|extern\s+"[^"]*")\s+)*fn\s+(\w+)\s*(?:<[^{(]*>)?\s*\(([^)]*)\)\s*(?:->\s*([^{;]+?))?\s*(?:where\b[^{;]*)?[{;]"#
    ).unwrap();
    static ref TYPE_RE: Regex = Regex::new(
        r"(?m)^[ \t]*pub(\s*\([^)]*\))?\s+(?:unsafe\s+)?(struct|enum|trait|type|union)\s+(\w+)"
    ).unwrap();
    static ref USE_RE: Regex = Regex::new(
        r"(?m)^[ \t]*(?:pub(?:\s*\([^)]*\))?\s+)?use\s+(?:::)?([^;]+);"
    ).unwrap();
    static ref EXTERN_CRATE_RE: Regex = Regex::new(r"(?m)^[ \t]*extern\s+crate\s+(\w+)").unwrap();
    static ref DERIVE_RE: Regex = Regex::new(r"#\[derive\(([^\]]*)\)\]").unwrap();
    static ref DERIVE_PATH_RE: Regex = Regex::new(r"(\w+)::\w+").unwrap();
    // TokenError::Expired
    static ref ERROR_VARIANT_RE: Regex = Regex::new(r"\b(\w*Error::\w+)").unwrap();
}

/// Rust language analyzer.
pub struct RustAnalyzer;

impl RustAnalyzer {
    /// Create a new Rust analyzer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the binding name of each parameter; receivers are kept whole.
fn reduce_param(param: &str) -> Option<String> {
    let name = match param.split_once(':') {
        Some((name, _)) => name.trim().trim_start_matches("mut "),
        None => param,
    };
    Some(name.to_string())
}

/// The leading identifier of a path such as `serde::{Deserialize, Serialize}`.
fn path_root(path: &str) -> &str {
    let end = path
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(path.len());
    &path[..end]
}

/// `crate::a::{b, c}` is reported as `crate::a`.
fn internal_path(path: &str) -> String {
    let path = path.split('{').next().unwrap_or(path);
    let path = path.split(" as ").next().unwrap_or(path);
    collapse_whitespace(path)
        .trim_end_matches('*')
        .trim_end_matches("::")
        .to_string()
}

impl LanguageAnalyzer for RustAnalyzer {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn extract_exports(&self, content: &str) -> Exports {
        let mut exports = ExportsBuilder::new();

        for caps in FUNCTION_RE.captures_iter(content) {
            if !group(&caps, 1).is_empty() {
                continue;
            }
            let name = group(&caps, 2);
            let (start, end) = span(&caps);
            let mut signature = format!(
                "fn {}({})",
                name,
                simplify_params(group(&caps, 3), reduce_param)
            );
            let returns = group(&caps, 4);
            if !returns.is_empty() {
                signature.push_str(" -> ");
                signature.push_str(&collapse_whitespace(returns));
            }
            exports.function(start, name, signature, describe(content, start, end, DOC));
        }

        for caps in TYPE_RE.captures_iter(content) {
            if !group(&caps, 1).is_empty() {
                continue;
            }
            let kind = group(&caps, 2);
            let name = group(&caps, 3);
            let (start, end) = span(&caps);
            exports.ty(
                start,
                name,
                kind,
                format!("pub {} {}", kind, name),
                describe(content, start, end, DOC),
            );
        }

        exports.build()
    }

    fn extract_dependencies(&self, content: &str) -> Dependencies {
        // (position, is_internal, reference)
        let mut refs: Vec<(usize, bool, String)> = Vec::new();

        for caps in USE_RE.captures_iter(content) {
            let path = group(&caps, 1);
            let root = path_root(path);
            let (start, _) = span(&caps);
            match root {
                "" => {}
                "crate" | "super" | "self" => refs.push((start, true, internal_path(path))),
                _ => refs.push((start, false, root.to_string())),
            }
        }
        for caps in EXTERN_CRATE_RE.captures_iter(content) {
            let (start, _) = span(&caps);
            refs.push((start, false, group(&caps, 1).to_string()));
        }
        for caps in DERIVE_RE.captures_iter(content) {
            let (start, _) = span(&caps);
            for path in DERIVE_PATH_RE.captures_iter(group(&caps, 1)) {
                refs.push((start, false, group(&path, 1).to_string()));
            }
        }
        refs.sort_by_key(|(pos, _, _)| *pos);

        let mut deps = Dependencies::default();
        for (_, internal, reference) in refs {
            if internal {
                deps.add_internal(reference);
            } else if !is_stdlib(Language::Rust, &reference) {
                deps.add_external(reference);
            }
        }
        deps
    }

    fn extract_behaviors(&self, content: &str) -> Vec<Behavior> {
        let mut behaviors = Vec::new();
        if content.contains("Ok(") {
            behaviors.push(Behavior::success("Valid input", "Ok(value)"));
        }
        let variants = collect_identifiers(content, &[&*ERROR_VARIANT_RE]);
        behaviors.extend(infer_errors(&variants, content, &ERRORS, str::to_string));
        behaviors
    }
}
