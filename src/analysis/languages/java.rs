//! Java language analyzer.
//!
//! Exports are declarations marked `public`. Public methods named with an
//! uppercase initial are taken for constructors and skipped, as are names
//! that the file also declares as private methods.

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

const DOC: DocStyle = DocStyle::Block;

const ERRORS: ErrorVocabulary = ErrorVocabulary {
    expired: "TokenExpiredException",
    invalid: "InvalidTokenException",
    text_fallback: true,
};

lazy_static! {
    static ref METHOD_RE: Regex = Regex::new(
        r"(?m)^[ \t]*public\s+(?:(?:static|final|abstract|synchronized|default|native)\s+)*(?:<[^>]+>\s+)?([\w.]+(?:<[^{}()]*?>)?(?:\[\])*)\s+(\w+)\s*\(([^)]*)\)\s*(?:throws\s+([^{;]+?))?\s*[{;]"
    ).unwrap();
    static ref PRIVATE_METHOD_RE: Regex = Regex::new(
        r"(?m)^[ \t]*private\s+(?:(?:static|final|synchronized|native)\s+)*(?:<[^>]+>\s+)?[\w.]+(?:<[^{}()]*?>)?(?:\[\])*\s+(\w+)\s*\("
    ).unwrap();
    static ref CLASS_RE: Regex = Regex::new(
        r"(?m)^[ \t]*public\s+(?:(?:static|final|abstract|sealed|non-sealed|strictfp)\s+)*class\s+(\w+)(?:\s*<[^{]*?>)?(?:\s+extends\s+([\w.]+(?:<[^{]*?>)?))?(?:\s+implements\s+([^{]+?))?(?:\s+permits\s+[^{]+?)?\s*\{"
    ).unwrap();
    static ref RECORD_RE: Regex = Regex::new(
        r"(?m)^[ \t]*public\s+(?:(?:static|final)\s+)*record\s+(\w+)\s*(?:<[^(]*>)?\s*\(([^)]*)\)"
    ).unwrap();
    static ref ENUM_RE: Regex = Regex::new(r"(?m)^[ \t]*public\s+(?:static\s+)?enum\s+(\w+)").unwrap();
    static ref INTERFACE_RE: Regex = Regex::new(
        r"(?m)^[ \t]*public\s+(?:(?:static|sealed|non-sealed)\s+)*interface\s+(\w+)"
    ).unwrap();

    static ref IMPORT_RE: Regex = Regex::new(
        r"(?m)^[ \t]*import\s+(?:static\s+)?([\w.]+?)(?:\.\*)?\s*;"
    ).unwrap();

    static ref THROW_RE: Regex = Regex::new(r"\bthrow\s+new\s+([\w.]+)\s*\(").unwrap();
    static ref THROWS_RE: Regex = Regex::new(r"\bthrows\s+([\w.]+(?:\s*,\s*[\w.]+)*)").unwrap();
    static ref RETURN_RE: Regex = Regex::new(r"\breturn\b").unwrap();
}

/// Java language analyzer.
pub struct JavaAnalyzer;

impl JavaAnalyzer {
    /// Create a new Java analyzer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// `Type name`, with annotations and `final` dropped.
fn reduce_param(param: &str) -> Option<String> {
    let words: Vec<&str> = param
        .split_whitespace()
        .filter(|w| !w.starts_with('@') && *w != "final")
        .collect();
    (words.len() >= 2).then(|| words.join(" "))
}

/// First two segments of a dotted name, e.g. `io.jsonwebtoken`.
fn package_prefix(name: &str) -> String {
    name.split('.').take(2).collect::<Vec<_>>().join(".")
}

/// Classify a JVM import.
///
/// Imports carry no relative marker, so every non-standard reference is
/// external, reduced to its two-segment prefix. Single-segment imports
/// (default package) are ignored.
pub(super) fn classify_jvm_import(lang: Language, import: &str, deps: &mut Dependencies) {
    let mut segments = import.split('.');
    let (Some(root), Some(_)) = (segments.next(), segments.next()) else {
        return;
    };
    if is_stdlib(lang, root) {
        return;
    }
    deps.add_external(package_prefix(import));
}

/// Names collected from `throws A, B` clauses.
pub(super) fn thrown_names(content: &str, throws_re: &Regex) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in throws_re.captures_iter(content) {
        for name in group(&caps, 1).split(',').map(str::trim) {
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

impl LanguageAnalyzer for JavaAnalyzer {
    fn language(&self) -> Language {
        Language::Java
    }

    fn extract_exports(&self, content: &str) -> Exports {
        let private_methods: Vec<&str> = PRIVATE_METHOD_RE
            .captures_iter(content)
            .map(|caps| group(&caps, 1))
            .collect();

        let mut exports = ExportsBuilder::new();

        for caps in METHOD_RE.captures_iter(content) {
            let name = group(&caps, 2);
            let constructor_like = name.chars().next().map_or(true, char::is_uppercase);
            if constructor_like || private_methods.contains(&name) {
                continue;
            }
            let (start, _) = span(&caps);
            let mut signature = format!(
                "{} {}({})",
                collapse_whitespace(group(&caps, 1)),
                name,
                simplify_params(group(&caps, 3), reduce_param)
            );
            let throws = group(&caps, 4);
            if !throws.is_empty() {
                signature.push_str(" throws ");
                signature.push_str(&collapse_whitespace(throws));
            }
            exports.function(start, name, signature, describe(content, start, start, DOC));
        }

        for caps in CLASS_RE.captures_iter(content) {
            let name = group(&caps, 1);
            let (start, _) = span(&caps);
            let description = describe(content, start, start, DOC);

            let mut signature = format!("public class {}", name);
            let extends = group(&caps, 2);
            if !extends.is_empty() {
                signature.push_str(" extends ");
                signature.push_str(extends);
            }
            let implements = group(&caps, 3);
            if !implements.is_empty() {
                signature.push_str(" implements ");
                signature.push_str(&collapse_whitespace(implements));
            }

            if extends.contains("Exception") {
                exports.ty(start, name, "exception", signature, description);
            } else {
                exports.class(start, name, signature, description);
            }
        }

        for caps in RECORD_RE.captures_iter(content) {
            let name = group(&caps, 1);
            let (start, _) = span(&caps);
            exports.ty(
                start,
                name,
                "record",
                format!(
                    "public record {}({})",
                    name,
                    simplify_params(group(&caps, 2), reduce_param)
                ),
                describe(content, start, start, DOC),
            );
        }

        for (re, kind) in [(&*ENUM_RE, "enum"), (&*INTERFACE_RE, "interface")] {
            for caps in re.captures_iter(content) {
                let name = group(&caps, 1);
                let (start, _) = span(&caps);
                exports.ty(
                    start,
                    name,
                    kind,
                    format!("public {} {}", kind, name),
                    describe(content, start, start, DOC),
                );
            }
        }

        exports.build()
    }

    fn extract_dependencies(&self, content: &str) -> Dependencies {
        let mut deps = Dependencies::default();
        for caps in IMPORT_RE.captures_iter(content) {
            classify_jvm_import(Language::Java, group(&caps, 1), &mut deps);
        }
        deps
    }

    fn extract_behaviors(&self, content: &str) -> Vec<Behavior> {
        let mut behaviors = Vec::new();
        if RETURN_RE.is_match(content) {
            behaviors.push(Behavior::success("Valid input", "Return value"));
        }

        let mut identifiers = collect_identifiers(content, &[&*THROW_RE]);
        for name in thrown_names(content, &THROWS_RE) {
            if !identifiers.contains(&name) {
                identifiers.push(name);
            }
        }
        behaviors.extend(infer_errors(&identifiers, content, &ERRORS, str::to_string));
        behaviors
    }
}
