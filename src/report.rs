//! Output formatting for codebrief results.
//!
//! Supports two output formats:
//! - JSON: the serialized [`AnalysisResult`] for programmatic consumption
//! - Pretty: colored terminal output for human readability

use colored::*;
use std::fmt::Write as _;
use std::str::FromStr;

use crate::analysis::{AnalysisResult, BehaviorCategory};

/// Output format selected on the command line or in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Pretty,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Pretty => "pretty",
        }
    }
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "pretty" => Ok(Format::Pretty),
            other => anyhow::bail!("invalid format {:?}, must be 'json' or 'pretty'", other),
        }
    }
}

/// Render a result in the requested format.
pub fn render(result: &AnalysisResult, format: Format) -> anyhow::Result<String> {
    match format {
        Format::Json => render_json(result),
        Format::Pretty => Ok(render_pretty(result)),
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// Pretty-printed JSON in the `AnalysisResult` wire shape.
pub fn render_json(result: &AnalysisResult) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(result)?;
    json.push('\n');
    Ok(json)
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Human-readable summary.
pub fn render_pretty(result: &AnalysisResult) -> String {
    let mut out = String::new();

    // Header
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {} v{}",
        "codebrief".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}{}", "Path:  ".dimmed(), result.path);
    let _ = writeln!(
        out,
        "  {}{}",
        "Files: ".dimmed(),
        if result.analyzed_files.is_empty() {
            "(none)".to_string()
        } else {
            result.analyzed_files.join(", ")
        }
    );
    let _ = writeln!(out);

    write_exports(&mut out, result);
    write_dependencies(&mut out, result);
    write_behaviors(&mut out, result);

    out
}

fn write_section_title(out: &mut String, title: &str, count: usize) {
    let _ = writeln!(out, "  {} ({}):", title.bold(), count);
}

fn write_description(out: &mut String, description: &str) {
    if !description.is_empty() {
        let _ = writeln!(out, "      {}", description.dimmed());
    }
}

fn write_exports(out: &mut String, result: &AnalysisResult) {
    let exports = &result.exports;

    if !exports.functions.is_empty() {
        write_section_title(out, "Functions", exports.functions.len());
        for f in &exports.functions {
            let _ = writeln!(out, "    {}", f.signature.green());
            write_description(out, &f.description);
        }
        let _ = writeln!(out);
    }

    if !exports.types.is_empty() {
        write_section_title(out, "Types", exports.types.len());
        for t in &exports.types {
            let _ = writeln!(out, "    {:<12}{}", t.kind.dimmed(), t.definition.blue());
            write_description(out, &t.description);
        }
        let _ = writeln!(out);
    }

    if !exports.classes.is_empty() {
        write_section_title(out, "Classes", exports.classes.len());
        for c in &exports.classes {
            let _ = writeln!(out, "    {}", c.signature.blue());
            write_description(out, &c.description);
        }
        let _ = writeln!(out);
    }
}

fn write_dependencies(out: &mut String, result: &AnalysisResult) {
    let deps = &result.dependencies;
    if deps.is_empty() {
        return;
    }

    write_section_title(out, "Dependencies", deps.external.len() + deps.internal.len());
    for dep in &deps.external {
        let _ = writeln!(out, "    {:<10}{}", "external".dimmed(), dep);
    }
    for dep in &deps.internal {
        let _ = writeln!(out, "    {:<10}{}", "internal".dimmed(), dep);
    }
    let _ = writeln!(out);
}

fn write_behaviors(out: &mut String, result: &AnalysisResult) {
    if result.behaviors.is_empty() {
        return;
    }

    write_section_title(out, "Behaviors", result.behaviors.len());
    for b in &result.behaviors {
        let tag = match b.category {
            BehaviorCategory::Success => "✓".green(),
            BehaviorCategory::Error => "✗".red(),
        };
        let _ = writeln!(out, "    {} {} -> {}", tag, b.input, b.output);
    }
    let _ = writeln!(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Behavior, ExportedFunction};

    fn sample() -> AnalysisResult {
        let mut result = AnalysisResult::empty("pkg/token.go");
        result.exports.functions.push(ExportedFunction {
            name: "ValidateToken".to_string(),
            signature: "ValidateToken(token string) (Claims, error)".to_string(),
            description: "validates a JWT token.".to_string(),
        });
        result.dependencies.add_external("github.com/golang-jwt/jwt");
        result
            .behaviors
            .push(Behavior::error("Expired input", "ErrTokenExpired"));
        result.analyzed_files.push("token.go".to_string());
        result
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("Pretty".parse::<Format>().unwrap(), Format::Pretty);
        assert!("sarif".parse::<Format>().is_err());
        assert_eq!(Format::default(), Format::Json);
    }

    #[test]
    fn test_render_json_shape() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["path"], "pkg/token.go");
        assert_eq!(value["analyzedFiles"][0], "token.go");
        assert_eq!(value["behaviors"][0]["category"], "error");
        assert_eq!(
            value["dependencies"]["external"][0],
            "github.com/golang-jwt/jwt"
        );
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_render_pretty_lists_sections() {
        colored::control::set_override(false);
        let text = render_pretty(&sample());

        assert!(text.contains("codebrief v"));
        assert!(text.contains("Functions (1):"));
        assert!(text.contains("ValidateToken(token string) (Claims, error)"));
        assert!(text.contains("external  github.com/golang-jwt/jwt"));
        assert!(text.contains("Expired input -> ErrTokenExpired"));
        assert!(!text.contains("Types ("));
    }

    #[test]
    fn test_render_pretty_empty_result() {
        colored::control::set_override(false);
        let text = render_pretty(&AnalysisResult::empty("missing.go"));
        assert!(text.contains("(none)"));
        assert!(!text.contains("Behaviors"));
    }
}
