//! TypeScript language analyzer.
//!
//! Extracts:
//! - `export` functions, including `export default function` and exported
//!   arrow-function constants
//! - Exported interfaces, type aliases and enums
//! - Exported classes with their `extends`/`implements` clauses
//! - Module references from `import`, `export ... from` and `require(...)`

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
    expired: "TokenExpiredError",
    invalid: "InvalidTokenError",
    text_fallback: true,
};

/// Interface bodies are summarized by their first few members.
const MAX_BODY_LINES: usize = 3;

lazy_static! {
    static ref FUNCTION_RE: Regex = Regex::new(
        r"(?m)^[ \t]*export\s+(?:default\s+)?(?:async\s+)?function\s*\*?\s*(\w+)\s*(?:<[^(]*>)?\s*\(([^)]*)\)\s*(?::\s*([^{;]+?))?\s*[{;]"
    ).unwrap();
    // export const name = async (params): Ret =>
    static ref ARROW_RE: Regex = Regex::new(
        r"(?m)^[ \t]*export\s+const\s+(\w+)\s*(?::[^=]+)?=\s*(?:async\s+)?(?:<[^(]*>\s*)?\(([^)]*)\)\s*(?::\s*([^=]+?))?\s*=>"
    ).unwrap();
    static ref CLASS_RE: Regex = Regex::new(
        r"(?m)^[ \t]*export\s+(?:default\s+)?(?:abstract\s+)?class\s+(\w+)(?:\s*<[^{]*?>)?(?:\s+extends\s+([\w.]+(?:<[^{]*?>)?))?(?:\s+implements\s+([^{]+?))?\s*\{"
    ).unwrap();
    static ref INTERFACE_RE: Regex = Regex::new(
        r"(?m)^[ \t]*export\s+(?:declare\s+)?interface\s+(\w+)(?:\s*<[^{]*?>)?(?:\s+extends\s+[^{]+?)?\s*\{([^}]*)\}"
    ).unwrap();
    static ref TYPE_ALIAS_RE: Regex = Regex::new(
        r"(?m)^[ \t]*export\s+(?:declare\s+)?type\s+(\w+)(?:\s*<[^=]*>)?\s*=\s*([^;]+);"
    ).unwrap();
    static ref ENUM_RE: Regex = Regex::new(
        r"(?m)^[ \t]*export\s+(?:declare\s+)?(?:const\s+)?enum\s+(\w+)"
    ).unwrap();

    static ref IMPORT_FROM_RE: Regex = Regex::new(
        r#"(?m)^[ \t]*import\s+(?:type\s+)?[\w{},\s*$]+?\s+from\s+['"]([^'"]+)['"]"#
    ).unwrap();
    static ref IMPORT_BARE_RE: Regex = Regex::new(r#"(?m)^[ \t]*import\s+['"]([^'"]+)['"]"#).unwrap();
    static ref REEXPORT_RE: Regex = Regex::new(
        r#"(?m)^[ \t]*export\s+(?:type\s+)?(?:\*|\{[^}]*\})(?:\s+as\s+\w+)?\s+from\s+['"]([^'"]+)['"]"#
    ).unwrap();
    static ref REQUIRE_RE: Regex = Regex::new(
        r#"\b(?:require|import)\(\s*['"]([^'"]+)['"]\s*\)"#
    ).unwrap();

    static ref THROW_RE: Regex = Regex::new(r"\bthrow\s+new\s+([\w.]+)\s*\(").unwrap();
    static ref INSTANCEOF_RE: Regex = Regex::new(r"\binstanceof\s+([\w.]+)").unwrap();
    static ref RETURN_RE: Regex = Regex::new(r"\breturn[ \t]+[^\s;]").unwrap();
}

/// TypeScript language analyzer.
pub struct TypeScriptAnalyzer;

impl TypeScriptAnalyzer {
    /// Create a new TypeScript analyzer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for TypeScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_function(name: &str, params: &str, returns: &str) -> String {
    let mut signature = format!(
        "{}({})",
        name,
        simplify_params(params, |p| Some(p.to_string()))
    );
    if !returns.is_empty() {
        signature.push_str(": ");
        signature.push_str(&collapse_whitespace(returns));
    }
    signature
}

/// `{ a: string; b: number; ... }` from the member lines of a body.
fn summarize_body(body: &str) -> String {
    let members: Vec<&str> = body
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("//"))
        .collect();
    let mut summary = members
        .iter()
        .take(MAX_BODY_LINES)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if members.len() > MAX_BODY_LINES {
        summary.push_str("...");
    }
    summary
}

/// Relative and absolute paths are in-project; packages are reduced to
/// their name (`@scope/name` for scoped packages).
fn classify_module(module: &str, deps: &mut Dependencies) {
    if module.starts_with('.') || module.starts_with('/') {
        deps.add_internal(module);
        return;
    }
    let mut segments = module.split('/');
    let package = match (segments.next(), segments.next()) {
        (Some(scope), Some(name)) if scope.starts_with('@') => format!("{}/{}", scope, name),
        (Some(first), _) => first.to_string(),
        _ => return,
    };
    if !is_stdlib(Language::TypeScript, &package) {
        deps.add_external(package);
    }
}

impl LanguageAnalyzer for TypeScriptAnalyzer {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn extract_exports(&self, content: &str) -> Exports {
        let mut exports = ExportsBuilder::new();

        for re in [&*FUNCTION_RE, &*ARROW_RE] {
            for caps in re.captures_iter(content) {
                let name = group(&caps, 1);
                let (start, _) = span(&caps);
                exports.function(
                    start,
                    name,
                    render_function(name, group(&caps, 2), group(&caps, 3)),
                    describe(content, start, start, DOC),
                );
            }
        }

        for caps in INTERFACE_RE.captures_iter(content) {
            let name = group(&caps, 1);
            let (start, _) = span(&caps);
            exports.ty(
                start,
                name,
                "interface",
                format!("interface {} {{ {} }}", name, summarize_body(group(&caps, 2))),
                describe(content, start, start, DOC),
            );
        }

        for caps in TYPE_ALIAS_RE.captures_iter(content) {
            let name = group(&caps, 1);
            let (start, _) = span(&caps);
            exports.ty(
                start,
                name,
                "type",
                format!("type {} = {}", name, collapse_whitespace(group(&caps, 2))),
                describe(content, start, start, DOC),
            );
        }

        for caps in ENUM_RE.captures_iter(content) {
            let name = group(&caps, 1);
            let (start, _) = span(&caps);
            exports.ty(
                start,
                name,
                "enum",
                format!("enum {}", name),
                describe(content, start, start, DOC),
            );
        }

        for caps in CLASS_RE.captures_iter(content) {
            let name = group(&caps, 1);
            let (start, _) = span(&caps);
            let mut signature = format!("class {}", name);
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
            exports.class(start, name, signature, describe(content, start, start, DOC));
        }

        exports.build()
    }

    fn extract_dependencies(&self, content: &str) -> Dependencies {
        let mut modules: Vec<(usize, &str)> = Vec::new();
        for re in [
            &*IMPORT_FROM_RE,
            &*IMPORT_BARE_RE,
            &*REEXPORT_RE,
            &*REQUIRE_RE,
        ] {
            for caps in re.captures_iter(content) {
                if let Some(m) = caps.get(1) {
                    modules.push((m.start(), m.as_str()));
                }
            }
        }
        modules.sort_by_key(|(pos, _)| *pos);

        let mut deps = Dependencies::default();
        for (_, module) in modules {
            classify_module(module, &mut deps);
        }
        deps
    }

    fn extract_behaviors(&self, content: &str) -> Vec<Behavior> {
        let mut behaviors = Vec::new();
        if RETURN_RE.is_match(content) {
            behaviors.push(Behavior::success("Valid input", "Return value"));
        }
        let identifiers = collect_identifiers(content, &[&*THROW_RE, &*INSTANCEOF_RE]);
        behaviors.extend(infer_errors(&identifiers, content, &ERRORS, str::to_string));
        behaviors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::BehaviorCategory;

    const INDEX: &str = r#"import { Claims, TokenConfig } from './types';
import jwt from 'jsonwebtoken';
import * as path from 'path';
import { readFile } from 'node:fs/promises';
import {
  Injectable,
} from '@nestjs/common';
import 'reflect-metadata';
export * from './errors';
const lodash = require('lodash/fp');

/**
 * Validates a JWT token and returns the claims
 * @param token - The JWT token to validate
 */
export async function validateToken(token: string): Promise<Claims> {
  try {
    return jwt.verify(token, secret) as Claims;
  } catch (e) {
    if (e instanceof jwt.TokenExpiredError) {
      throw new TokenExpiredError('Token has expired');
    }
    throw new InvalidTokenError('Invalid token');
  }
}

export const decode = async (token: string, options?: DecodeOptions): Promise<Claims> => {
  return jwt.decode(token) as Claims;
};

function internal(a: number) {
  return a;
}

export class TokenExpiredError extends Error {
  constructor(message: string) {
    super(message);
  }
}

export abstract class TokenService<T> extends BaseService<T> implements Verifier, Signer {
}

export enum Role { Admin, User }
"#;

    const TYPES: &str = r#"/**
 * JWT token claims structure
 */
export interface Claims {
  userId: string;
  role: Role;
  // issued at
  exp: number;
  iat: number;
}

export type Role = 'admin' | 'user' | 'guest';

export interface TokenConfig {
  secret: string;
}
"#;

    #[test]
    fn test_functions() {
        let exports = TypeScriptAnalyzer::new().extract_exports(INDEX);
        let sigs: Vec<_> = exports
            .functions
            .iter()
            .map(|f| (f.name.as_str(), f.signature.as_str()))
            .collect();
        assert_eq!(
            sigs,
            vec![
                ("validateToken", "validateToken(token: string): Promise<Claims>"),
                (
                    "decode",
                    "decode(token: string, options?: DecodeOptions): Promise<Claims>"
                ),
            ]
        );
        assert_eq!(
            exports.functions[0].description,
            "Validates a JWT token and returns the claims"
        );
        assert_eq!(exports.functions[1].description, "");
    }

    #[test]
    fn test_classes_and_enum() {
        let exports = TypeScriptAnalyzer::new().extract_exports(INDEX);
        let sigs: Vec<_> = exports.classes.iter().map(|c| c.signature.as_str()).collect();
        assert_eq!(
            sigs,
            vec![
                "class TokenExpiredError extends Error",
                "class TokenService extends BaseService<T> implements Verifier, Signer",
            ]
        );
        assert_eq!(exports.types[0].name, "Role");
        assert_eq!(exports.types[0].kind, "enum");
    }

    #[test]
    fn test_interfaces_and_aliases() {
        let exports = TypeScriptAnalyzer::new().extract_exports(TYPES);
        let types: Vec<_> = exports
            .types
            .iter()
            .map(|t| (t.name.as_str(), t.kind.as_str()))
            .collect();
        assert_eq!(
            types,
            vec![
                ("Claims", "interface"),
                ("Role", "type"),
                ("TokenConfig", "interface"),
            ]
        );
        assert_eq!(
            exports.types[0].definition,
            "interface Claims { userId: string; role: Role; exp: number;... }"
        );
        assert_eq!(exports.types[0].description, "JWT token claims structure");
        assert_eq!(
            exports.types[1].definition,
            "type Role = 'admin' | 'user' | 'guest'"
        );
        assert_eq!(exports.types[2].definition, "interface TokenConfig { secret: string; }");
    }

    #[test]
    fn test_dependencies() {
        let deps = TypeScriptAnalyzer::new().extract_dependencies(INDEX);
        assert_eq!(
            deps.external,
            vec!["jsonwebtoken", "@nestjs/common", "reflect-metadata", "lodash"]
        );
        assert_eq!(deps.internal, vec!["./types", "./errors"]);
    }

    #[test]
    fn test_behaviors() {
        let behaviors = TypeScriptAnalyzer::new().extract_behaviors(INDEX);
        assert_eq!(behaviors[0].category, BehaviorCategory::Success);

        let errors: Vec<_> = behaviors[1..].iter().map(|b| b.output.as_str()).collect();
        assert_eq!(errors, vec!["TokenExpiredError", "InvalidTokenError"]);
    }

    #[test]
    fn test_unexported_declarations_are_ignored() {
        let exports = TypeScriptAnalyzer::new()
            .extract_exports("function a() {}\nclass B {}\ninterface C { x: number }\n");
        assert!(exports.is_empty());
    }
}
