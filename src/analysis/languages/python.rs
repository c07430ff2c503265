//! Python language analyzer.
//!
//! Only module-level `def` and `class` statements are considered. A name is
//! public unless it has a single leading underscore; a declared `__all__`
//! replaces that rule with its own list.

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

const DOC: DocStyle = DocStyle::Docstring;

const ERRORS: ErrorVocabulary = ErrorVocabulary {
    expired: "ExpiredSignatureError",
    invalid: "InvalidTokenError",
    text_fallback: true,
};

lazy_static! {
    static ref FUNCTION_RE: Regex = Regex::new(
        r"(?m)^(?:async\s+)?def\s+(\w+)\s*\(([^)]*)\)\s*(?:->\s*([^:]+?))?\s*:"
    ).unwrap();
    static ref CLASS_RE: Regex = Regex::new(
        r"(?m)^class\s+(\w+)(?:\s*\(([^)]*)\))?\s*:"
    ).unwrap();
    // @dataclass or @dataclass(frozen=True), possibly followed by more decorators
    static ref DATACLASS_RE: Regex = Regex::new(
        r"(?m)^@(?:dataclasses\.)?dataclass\b(?:\([^)]*\))?[ \t]*\n(?:@[^\n]*\n)*class\s+(\w+)"
    ).unwrap();
    // __all__ = [...] / (...), optionally annotated
    static ref ALL_RE: Regex = Regex::new(
        r"(?m)^__all__\s*(?::[^=\n]+)?=\s*[\[(]([^\])]*)[\])]"
    ).unwrap();
    static ref QUOTED_NAME_RE: Regex = Regex::new(r#"['"](\w+)['"]"#).unwrap();
    static ref IMPORT_RE: Regex = Regex::new(
        r"(?m)^[ \t]*(?:from\s+(\S+)\s+import\b|import\s+([\w.]+(?:[ \t]*,[ \t]*[\w.]+)*))"
    ).unwrap();
    static ref RAISE_RE: Regex = Regex::new(r"\braise\s+([\w.]*(?:Error|Exception))\b").unwrap();
    static ref EXCEPT_RE: Regex = Regex::new(
        r"\bexcept\s*\(?\s*([\w.]*(?:Error|Exception))\b"
    ).unwrap();
    static ref RETURN_RE: Regex = Regex::new(r"(?m)\breturn[ \t]+\S").unwrap();
}

/// Python language analyzer.
pub struct PythonAnalyzer;

impl PythonAnalyzer {
    /// Create a new Python analyzer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for PythonAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Names listed in `__all__`, if the module declares one.
fn declared_all(content: &str) -> Option<Vec<String>> {
    let caps = ALL_RE.captures(content)?;
    let list = caps.get(1)?.as_str();
    Some(
        QUOTED_NAME_RE
            .captures_iter(list)
            .map(|c| group(&c, 1).to_string())
            .collect(),
    )
}

fn is_public(name: &str, all: Option<&[String]>) -> bool {
    match all {
        Some(listed) => listed.iter().any(|n| n == name),
        None => !name.starts_with('_') || name.starts_with("__"),
    }
}

fn classify_import(module: &str, deps: &mut Dependencies) {
    if module.starts_with('.') {
        deps.add_internal(module);
        return;
    }
    let top = module.split('.').next().unwrap_or(module);
    if !top.is_empty() && !is_stdlib(Language::Python, top) {
        deps.add_external(top);
    }
}

impl LanguageAnalyzer for PythonAnalyzer {
    fn language(&self) -> Language {
        Language::Python
    }

    fn extract_exports(&self, content: &str) -> Exports {
        let all = declared_all(content);
        let all = all.as_deref();
        let dataclasses: Vec<&str> = DATACLASS_RE
            .captures_iter(content)
            .map(|c| group(&c, 1))
            .collect();

        let mut exports = ExportsBuilder::new();

        for caps in FUNCTION_RE.captures_iter(content) {
            let name = group(&caps, 1);
            if !is_public(name, all) {
                continue;
            }
            let (start, end) = span(&caps);
            let mut signature = format!(
                "{}({})",
                name,
                simplify_params(group(&caps, 2), |p| Some(p.to_string()))
            );
            let returns = group(&caps, 3);
            if !returns.is_empty() {
                signature.push_str(" -> ");
                signature.push_str(&collapse_whitespace(returns));
            }
            exports.function(start, name, signature, describe(content, start, end, DOC));
        }

        for caps in CLASS_RE.captures_iter(content) {
            let name = group(&caps, 1);
            if !is_public(name, all) {
                continue;
            }
            let (start, end) = span(&caps);
            let description = describe(content, start, end, DOC);
            if dataclasses.contains(&name) {
                exports.ty(
                    start,
                    name,
                    "dataclass",
                    format!("@dataclass class {}", name),
                    description,
                );
                continue;
            }
            let bases = collapse_whitespace(group(&caps, 2));
            let signature = if bases.is_empty() {
                format!("class {}", name)
            } else {
                format!("class {}({})", name, bases)
            };
            exports.class(start, name, signature, description);
        }

        exports.build()
    }

    fn extract_dependencies(&self, content: &str) -> Dependencies {
        let mut deps = Dependencies::default();
        for caps in IMPORT_RE.captures_iter(content) {
            let from = group(&caps, 1);
            if !from.is_empty() {
                classify_import(from, &mut deps);
                continue;
            }
            for module in group(&caps, 2).split(',') {
                classify_import(module.trim(), &mut deps);
            }
        }
        deps
    }

    fn extract_behaviors(&self, content: &str) -> Vec<Behavior> {
        let mut behaviors = Vec::new();
        if RETURN_RE.is_match(content) {
            behaviors.push(Behavior::success("Valid input", "Return value"));
        }
        let identifiers = collect_identifiers(content, &[&*RAISE_RE, &*EXCEPT_RE]);
        behaviors.extend(infer_errors(&identifiers, content, &ERRORS, str::to_string));
        behaviors
    }
}
