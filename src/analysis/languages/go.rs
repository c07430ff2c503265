//! Go language analyzer.
//!
//! Extracts:
//! - Exported functions and methods (receiver kept in the signature)
//! - Struct, interface and named type declarations
//! - Sentinel error variables (`errors.New`, `fmt.Errorf`), reported as classes
//! - Imports, single and grouped
//!
//! A name is exported when it starts with an uppercase letter.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::behavior::{collect_identifiers, infer_errors, ErrorVocabulary};
use crate::analysis::stdlib::is_stdlib;
use crate::analysis::text::{describe, group, simplify_params, span, DocStyle};
use crate::analysis::{
    Behavior, Dependencies, Exports, ExportsBuilder, Language, LanguageAnalyzer,
};

const DOC: DocStyle = DocStyle::LineRun {
    prefix: "//",
    skip: &[],
};

const ERRORS: ErrorVocabulary = ErrorVocabulary {
    expired: "ErrExpiredToken",
    invalid: "ErrInvalidToken",
    text_fallback: true,
};

lazy_static! {
    // func Name[T any](params) (results) {
    static ref FUNCTION_RE: Regex = Regex::new(
        r"(?m)^func\s+(\w+)\s*(?:\[[^\]]*\])?\s*\(([^)]*)\)\s*(?:\(([^)]+)\)|([^\s{]+))?\s*\{"
    ).unwrap();
    // func (r *Recv) Name(params) (results) {
    static ref METHOD_RE: Regex = Regex::new(
        r"(?m)^func\s+\(\s*(\w+\s+)?(\*?\w+)(?:\[[^\]]*\])?\s*\)\s*(\w+)\s*\(([^)]*)\)\s*(?:\(([^)]+)\)|([^\s{]+))?\s*\{"
    ).unwrap();
    static ref STRUCT_RE: Regex = Regex::new(
        r"(?m)^type\s+(\w+)(?:\[[^\]]*\])?\s+struct\s*\{"
    ).unwrap();
    static ref INTERFACE_RE: Regex = Regex::new(
        r"(?m)^type\s+(\w+)(?:\[[^\]]*\])?\s+interface\s*\{"
    ).unwrap();
    // type ID string / type Alias = pkg.Type
    static ref NAMED_TYPE_RE: Regex = Regex::new(
        r"(?m)^type\s+(\w+)\s+(=\s*)?([^\s{/][^{\n]*?)\s*(?://.*)?$"
    ).unwrap();
    // var ErrX = errors.New(...), also inside var ( ... ) blocks
    static ref ERROR_VAR_RE: Regex = Regex::new(
        r"(?m)^[ \t]*(?:var\s+)?(Err\w+)\s*(?:error\s*)?=\s*(errors\.New|fmt\.Errorf)\b"
    ).unwrap();
    static ref IMPORT_BLOCK_RE: Regex = Regex::new(r"(?m)^import\s*\(([^)]*)\)").unwrap();
    static ref IMPORT_SINGLE_RE: Regex = Regex::new(
        r#"(?m)^import\s+(?:[\w.]+\s+)?"([^"]+)""#
    ).unwrap();
    static ref QUOTED_RE: Regex = Regex::new(r#""([^"]+)""#).unwrap();
    // return nil, ErrX / return ErrX / return "", fmt.Errorf("...: %w", ErrX)
    static ref RETURN_ERROR_RE: Regex = Regex::new(r"\breturn\s+(?:[^\n]*?[,(]\s*)?(Err\w+)").unwrap();
    static ref RETURN_RE: Regex = Regex::new(r"(?m)\breturn[ \t]+([^\n]+)").unwrap();
}

/// Go language analyzer.
pub struct GoAnalyzer;

impl GoAnalyzer {
    /// Create a new Go analyzer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for GoAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_exported(name: &str) -> bool {
    name.chars().next().map_or(false, char::is_uppercase)
}

/// Parameters are kept as written (`name type`).
fn render_params(params: &str) -> String {
    simplify_params(params, |p| Some(p.to_string()))
}

/// Multi-value results stay parenthesized, a single result is bare.
fn render_results(multi: &str, single: &str) -> String {
    if !multi.is_empty() {
        format!(" ({})", render_params(multi))
    } else if !single.is_empty() {
        format!(" {}", single)
    } else {
        String::new()
    }
}

/// Std packages are dropped; a dotted first segment means a module path.
fn classify_import(path: &str, deps: &mut Dependencies) {
    let first = path.split('/').next().unwrap_or(path);
    if is_stdlib(Language::Go, first) {
        return;
    }
    if first.contains('.') {
        deps.add_external(path);
    } else {
        deps.add_internal(path);
    }
}

impl LanguageAnalyzer for GoAnalyzer {
    fn language(&self) -> Language {
        Language::Go
    }

    fn extract_exports(&self, content: &str) -> Exports {
        let mut exports = ExportsBuilder::new();

        for caps in FUNCTION_RE.captures_iter(content) {
            let name = group(&caps, 1);
            if !is_exported(name) {
                continue;
            }
            let (start, end) = span(&caps);
            let signature = format!(
                "{}({}){}",
                name,
                render_params(group(&caps, 2)),
                render_results(group(&caps, 3), group(&caps, 4))
            );
            exports.function(start, name, signature, describe(content, start, end, DOC));
        }

        for caps in METHOD_RE.captures_iter(content) {
            let name = group(&caps, 3);
            if !is_exported(name) {
                continue;
            }
            let (start, end) = span(&caps);
            let receiver = match group(&caps, 1) {
                "" => group(&caps, 2).to_string(),
                var => format!("{} {}", var, group(&caps, 2)),
            };
            let signature = format!(
                "({}) {}({}){}",
                receiver,
                name,
                render_params(group(&caps, 4)),
                render_results(group(&caps, 5), group(&caps, 6))
            );
            exports.function(start, name, signature, describe(content, start, end, DOC));
        }

        for (re, kind) in [(&*STRUCT_RE, "struct"), (&*INTERFACE_RE, "interface")] {
            for caps in re.captures_iter(content) {
                let name = group(&caps, 1);
                if !is_exported(name) {
                    continue;
                }
                let (start, end) = span(&caps);
                exports.ty(
                    start,
                    name,
                    kind,
                    format!("type {} {}", name, kind),
                    describe(content, start, end, DOC),
                );
            }
        }

        for caps in NAMED_TYPE_RE.captures_iter(content) {
            let name = group(&caps, 1);
            let underlying = group(&caps, 3);
            if !is_exported(name) || underlying.is_empty() {
                continue;
            }
            let (start, end) = span(&caps);
            let definition = if group(&caps, 2).is_empty() {
                format!("type {} {}", name, underlying)
            } else {
                format!("type {} = {}", name, underlying)
            };
            exports.ty(start, name, "type", definition, describe(content, start, end, DOC));
        }

        for caps in ERROR_VAR_RE.captures_iter(content) {
            let name = group(&caps, 1);
            let (start, end) = span(&caps);
            exports.class(
                start,
                name,
                format!("var {} = {}(...)", name, group(&caps, 2)),
                describe(content, start, end, DOC),
            );
        }

        exports.build()
    }

    fn extract_dependencies(&self, content: &str) -> Dependencies {
        let mut imports: Vec<(usize, &str)> = Vec::new();

        for block in IMPORT_BLOCK_RE.captures_iter(content) {
            if let Some(body) = block.get(1) {
                for m in QUOTED_RE.captures_iter(body.as_str()) {
                    if let Some(path) = m.get(1) {
                        imports.push((body.start() + path.start(), path.as_str()));
                    }
                }
            }
        }
        for caps in IMPORT_SINGLE_RE.captures_iter(content) {
            if let Some(path) = caps.get(1) {
                imports.push((path.start(), path.as_str()));
            }
        }
        imports.sort_by_key(|(pos, _)| *pos);

        let mut deps = Dependencies::default();
        for (_, path) in imports {
            classify_import(path, &mut deps);
        }
        deps
    }

    fn extract_behaviors(&self, content: &str) -> Vec<Behavior> {
        let mut behaviors = Vec::new();

        // A return whose first value is not nil hands back a result.
        let values: Vec<&str> = RETURN_RE
            .captures_iter(content)
            .map(|caps| group(&caps, 1))
            .collect();
        let returns_value = values
            .iter()
            .any(|v| !v.starts_with("nil") && !v.starts_with("err") && !v.starts_with("Err"));
        if returns_value {
            let output = if values.iter().any(|v| v.ends_with(", nil")) {
                "Value with nil error"
            } else {
                "Return value"
            };
            behaviors.push(Behavior::success("Valid input", output));
        }

        let mut identifiers = collect_identifiers(content, &[&*RETURN_ERROR_RE]);
        for declared in collect_identifiers(content, &[&*ERROR_VAR_RE]) {
            if !identifiers.contains(&declared) {
                identifiers.push(declared);
            }
        }
        behaviors.extend(infer_errors(&identifiers, content, &ERRORS, str::to_string));

        behaviors
    }
}
