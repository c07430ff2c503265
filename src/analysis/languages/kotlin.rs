//! Kotlin language analyzer.
//!
//! Kotlin declarations are public by default, so everything is exported
//! unless marked `private`. A function name declared private anywhere in the
//! file is excluded everywhere.

use lazy_static::lazy_static;
use regex::Regex;

use super::java::classify_jvm_import;
use crate::analysis::behavior::{collect_identifiers, infer_errors, ErrorVocabulary};
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
    // [modifiers] fun [<T>] [Receiver.]name(params)[: Ret]
    static ref FUNCTION_RE: Regex = Regex::new(
        r"(?m)^[ \t]*((?:(?:public|internal|protected|private|override|open|final|abstract|suspend|inline|infix|operator|tailrec|external|actual|expect)\s+)*)fun\s+(?:<[^>]*>\s*)?(?:([\w.]+(?:<[^>]*>)?)\.)?(\w+)\s*\(([^)]*)\)\s*(?::\s*([^{=\n]+?))?\s*(?:[{=]|$)"
    ).unwrap();
    static ref CLASS_RE: Regex = Regex::new(
        r"(?m)^[ \t]*((?:(?:public|internal|protected|private|open|abstract|final|sealed|data|enum|annotation|inner|value|inline)\s+)*)(class|interface|object)\s+(\w+)(?:\s*<[^>]*>)?(?:\s*(?:(?:private|internal|protected)\s+)?(?:constructor\s*)?\(([^)]*)\))?(?:\s*:\s*([^{\n]+?))?\s*(?:\{|$)"
    ).unwrap();

    static ref IMPORT_RE: Regex = Regex::new(r"(?m)^[ \t]*import\s+([\w.]+)").unwrap();

    static ref THROW_RE: Regex = Regex::new(r"\bthrow\s+([\w.]+)\s*\(").unwrap();
    static ref FAILURE_RE: Regex = Regex::new(r"\bResult\.failure\(\s*([\w.]+)\s*\(").unwrap();
    static ref RESULT_TYPE_RE: Regex = Regex::new(r"\bResult<").unwrap();
    static ref RETURN_RE: Regex = Regex::new(r"\breturn\b").unwrap();
}

/// Kotlin language analyzer.
pub struct KotlinAnalyzer;

impl KotlinAnalyzer {
    /// Create a new Kotlin analyzer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for KotlinAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_private(modifiers: &str) -> bool {
    modifiers.split_whitespace().any(|m| m == "private")
}

/// Keep the parameter name; `val`/`var`/`vararg` and annotations go.
fn reduce_param(param: &str) -> Option<String> {
    let head = param.split(':').next().unwrap_or(param);
    head.split_whitespace()
        .filter(|w| !w.starts_with('@') && !matches!(*w, "val" | "var" | "vararg"))
        .last()
        .map(str::to_string)
}

impl LanguageAnalyzer for KotlinAnalyzer {
    fn language(&self) -> Language {
        Language::Kotlin
    }

    fn extract_exports(&self, content: &str) -> Exports {
        let private_functions: Vec<&str> = FUNCTION_RE
            .captures_iter(content)
            .filter(|caps| is_private(group(caps, 1)))
            .map(|caps| group(&caps, 3))
            .collect();

        let mut exports = ExportsBuilder::new();

        for caps in FUNCTION_RE.captures_iter(content) {
            let name = group(&caps, 3);
            if private_functions.contains(&name) {
                continue;
            }
            let (start, _) = span(&caps);
            let receiver = match group(&caps, 2) {
                "" => String::new(),
                r => format!("{}.", r),
            };
            let mut signature = format!(
                "fun {}{}({})",
                receiver,
                name,
                simplify_params(group(&caps, 4), reduce_param)
            );
            let returns = group(&caps, 5);
            if !returns.is_empty() {
                signature.push_str(": ");
                signature.push_str(&collapse_whitespace(returns));
            }
            exports.function(start, name, signature, describe(content, start, start, DOC));
        }

        for caps in CLASS_RE.captures_iter(content) {
            let modifiers = group(&caps, 1);
            if is_private(modifiers) {
                continue;
            }
            let keyword = group(&caps, 2);
            let name = group(&caps, 3);
            let base = collapse_whitespace(group(&caps, 5));
            let (start, _) = span(&caps);
            let description = describe(content, start, start, DOC);
            let has = |m: &str| modifiers.split_whitespace().any(|w| w == m);

            if has("data") {
                let definition = format!(
                    "data class {}({})",
                    name,
                    simplify_params(group(&caps, 4), reduce_param)
                );
                exports.ty(start, name, "data class", definition, description);
            } else if has("enum") {
                exports.ty(start, name, "enum class", format!("enum class {}", name), description);
            } else if has("sealed") {
                let kind = format!("sealed {}", keyword);
                let definition = format!("{} {}", kind, name);
                exports.ty(start, name, kind, definition, description);
            } else if keyword == "interface" {
                exports.ty(start, name, "interface", format!("interface {}", name), description);
            } else if keyword == "class" && base.contains("Exception") {
                exports.ty(
                    start,
                    name,
                    "exception",
                    format!("class {} : {}", name, base),
                    description,
                );
            } else {
                let mut signature = format!("{} {}", keyword, name);
                if !base.is_empty() {
                    signature.push_str(" : ");
                    signature.push_str(&base);
                }
                exports.class(start, name, signature, description);
            }
        }

        exports.build()
    }

    fn extract_dependencies(&self, content: &str) -> Dependencies {
        let mut deps = Dependencies::default();
        for caps in IMPORT_RE.captures_iter(content) {
            classify_jvm_import(Language::Kotlin, group(&caps, 1), &mut deps);
        }
        deps
    }

    fn extract_behaviors(&self, content: &str) -> Vec<Behavior> {
        let uses_result = RESULT_TYPE_RE.is_match(content);
        let mut behaviors = Vec::new();

        if uses_result {
            behaviors.push(Behavior::success("Valid input", "Result.success(value)"));
        } else if RETURN_RE.is_match(content) {
            behaviors.push(Behavior::success("Valid input", "Return value"));
        }

        let identifiers = collect_identifiers(content, &[&*THROW_RE, &*FAILURE_RE]);
        behaviors.extend(infer_errors(&identifiers, content, &ERRORS, |id| {
            if uses_result {
                format!("Result.failure({})", id)
            } else {
                id.to_string()
            }
        }));
        behaviors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::BehaviorCategory;

    const SERVICE: &str = r#"package com.example.token

import io.jsonwebtoken.Jwts
import kotlinx.coroutines.flow.Flow
import java.time.Instant
import com.example.token.store.TokenStore as Store

/**
 * Token configuration settings.
 */
data class TokenConfig(
    val secret: String,
    val expiresInSeconds: Long,
    val issuer: String? = null,
    @Transient var debug: Boolean = false
)

enum class Role { ADMIN, USER }

sealed class AuthState

interface Verifier {
    fun verify(token: String): Boolean
}

class TokenExpiredException(message: String) : Exception(message)

object Defaults : Verifier {
    override fun verify(token: String): Boolean = true
}

/**
 * Issues tokens.
 */
open class TokenService(private val store: Store) : Verifier {
    /**
     * Validate a token.
     */
    suspend fun validate(token: String): Result<TokenClaims> {
        if (token.isBlank()) {
            return Result.failure(InvalidTokenException("blank"))
        }
        return Result.success(decode(token))
    }

    private fun decode(token: String): TokenClaims = TODO()

    fun decode(token: String, strict: Boolean): TokenClaims = TODO()
}

fun String.toBearer(): String = "Bearer $this"

private class Cache
"#;

    #[test]
    fn test_functions() {
        let exports = KotlinAnalyzer::new().extract_exports(SERVICE);
        let sigs: Vec<_> = exports
            .functions
            .iter()
            .map(|f| f.signature.as_str())
            .collect();
        assert_eq!(
            sigs,
            vec![
                "fun verify(token): Boolean",
                "fun verify(token): Boolean",
                "fun validate(token): Result<TokenClaims>",
                "fun String.toBearer(): String",
            ]
        );
        assert_eq!(exports.functions[2].description, "Validate a token.");
    }

    #[test]
    fn test_types() {
        let exports = KotlinAnalyzer::new().extract_exports(SERVICE);
        let types: Vec<_> = exports
            .types
            .iter()
            .map(|t| (t.name.as_str(), t.kind.as_str()))
            .collect();
        assert_eq!(
            types,
            vec![
                ("TokenConfig", "data class"),
                ("Role", "enum class"),
                ("AuthState", "sealed class"),
                ("Verifier", "interface"),
                ("TokenExpiredException", "exception"),
            ]
        );
        assert_eq!(
            exports.types[0].definition,
            "data class TokenConfig(secret, expiresInSeconds, issuer...)"
        );
        assert_eq!(exports.types[0].description, "Token configuration settings.");
        assert_eq!(
            exports.types[4].definition,
            "class TokenExpiredException : Exception(message)"
        );
    }

    #[test]
    fn test_classes_skip_private() {
        let exports = KotlinAnalyzer::new().extract_exports(SERVICE);
        let sigs: Vec<_> = exports.classes.iter().map(|c| c.signature.as_str()).collect();
        assert_eq!(
            sigs,
            vec!["object Defaults : Verifier", "class TokenService : Verifier"]
        );
        assert_eq!(exports.classes[1].description, "Issues tokens.");
    }

    #[test]
    fn test_dependencies() {
        let deps = KotlinAnalyzer::new().extract_dependencies(SERVICE);
        assert_eq!(deps.external, vec!["io.jsonwebtoken", "com.example"]);
        assert!(deps.internal.is_empty());
    }

    #[test]
    fn test_platform_imports_are_excluded() {
        let content = "package com.example.auth\nimport sun.misc.Unsafe\nimport javax.inject.Inject\nimport io.jsonwebtoken.Jwts\n";
        let deps = KotlinAnalyzer::new().extract_dependencies(content);
        assert_eq!(deps.external, vec!["io.jsonwebtoken"]);
        assert!(deps.internal.is_empty());
    }

    #[test]
    fn test_result_wrapped_behaviors() {
        let behaviors = KotlinAnalyzer::new().extract_behaviors(SERVICE);
        assert_eq!(behaviors[0].category, BehaviorCategory::Success);
        assert_eq!(behaviors[0].output, "Result.success(value)");

        let errors: Vec<_> = behaviors[1..].iter().map(|b| b.output.as_str()).collect();
        assert_eq!(
            errors,
            vec![
                "Result.failure(TokenExpiredException)",
                "Result.failure(InvalidTokenException)",
            ]
        );
    }

    #[test]
    fn test_plain_throw_behaviors() {
        let content = "fun check(token: String): Claims {\n    if (token.isEmpty()) throw InvalidTokenException(\"empty\")\n    return parse(token)\n}\n";
        let behaviors = KotlinAnalyzer::new().extract_behaviors(content);
        assert_eq!(behaviors[0].output, "Return value");
        assert_eq!(behaviors[1].output, "InvalidTokenException");
        assert_eq!(behaviors.len(), 2);
    }
}
