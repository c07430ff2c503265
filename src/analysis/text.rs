//! Text helpers shared by the language grammars: doc comment lookup and
//! parameter list simplification.

use regex::Captures;

/// How far (in bytes) from a declaration a block doc comment may start.
const DOC_WINDOW: usize = 500;

/// Maximum number of parameters kept in a rendered signature.
const MAX_PARAMS: usize = 3;

/// Doc comment convention of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocStyle {
    /// A run of line comments directly above the declaration (`///`, `//`).
    /// Lines starting with any of `skip` may sit between the run and the item.
    LineRun {
        prefix: &'static str,
        skip: &'static [&'static str],
    },
    /// A `/** ... */` block above the declaration.
    Block,
    /// The first string literal following the declaration header.
    Docstring,
}

/// Find the description for a declaration spanning `start..end` in `content`.
///
/// Returns the first meaningful line of the comment, or an empty string.
pub fn describe(content: &str, start: usize, end: usize, style: DocStyle) -> String {
    match style {
        DocStyle::LineRun { prefix, skip } => line_run_above(content, start, prefix, skip),
        DocStyle::Block => block_above(content, start),
        DocStyle::Docstring => docstring_after(content, end),
    }
}

fn line_run_above(content: &str, pos: usize, prefix: &str, skip: &[&str]) -> String {
    let before = content[..pos].trim_end();
    let mut run = Vec::new();

    for line in before.lines().rev() {
        let trimmed = line.trim();
        if let Some(text) = trimmed.strip_prefix(prefix) {
            run.push(text.trim());
        } else if skip.iter().any(|s| trimmed.starts_with(s)) {
            continue;
        } else {
            break;
        }
    }

    run.into_iter()
        .rev()
        .find(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn block_above(content: &str, pos: usize) -> String {
    let window_start = floor_char_boundary(content, pos.saturating_sub(DOC_WINDOW));
    let window = &content[window_start..pos];

    let Some(open) = window.rfind("/**") else {
        return String::new();
    };
    let Some(close) = window[open..].find("*/").map(|i| open + i) else {
        return String::new();
    };

    // Anything that ends or opens a statement means the comment belongs to
    // something else.
    let between = &window[close + 2..];
    if between.contains(|c: char| c == ';' || c == '{' || c == '}') {
        return String::new();
    }

    window[open + 3..close]
        .lines()
        .map(|l| l.trim().trim_start_matches('*').trim())
        .find(|l| !l.is_empty() && !l.starts_with('@'))
        .unwrap_or_default()
        .to_string()
}

fn docstring_after(content: &str, pos: usize) -> String {
    let rest = content[pos..].trim_start();

    let body = if let Some(quote) = ["\"\"\"", "'''"].iter().find(|q| rest.starts_with(**q)) {
        let inner = &rest[3..];
        &inner[..inner.find(*quote).unwrap_or(inner.len())]
    } else if let Some(q) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let line = rest[1..].lines().next().unwrap_or("");
        &line[..line.find(q).unwrap_or(line.len())]
    } else {
        return String::new();
    };

    body.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Largest char boundary in `s` that is `<= index`.
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Split a parameter list on commas that are not nested in brackets.
pub fn split_params(params: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut last = 0;

    for (i, c) in params.char_indices() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = (depth - 1).max(0),
            ',' if depth <= 0 => {
                parts.push(&params[last..i]);
                last = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&params[last..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Render a simplified parameter list.
///
/// Each parameter is reduced by `reduce` (dropped when it returns `None`),
/// at most three are kept and `...` is appended when more were present.
pub fn simplify_params<F>(params: &str, reduce: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let parts: Vec<String> = split_params(params)
        .into_iter()
        .filter_map(|p| reduce(&collapse_whitespace(p)))
        .collect();

    let mut rendered = parts
        .iter()
        .take(MAX_PARAMS)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if parts.len() > MAX_PARAMS {
        rendered.push_str("...");
    }
    rendered
}

/// Byte span of the whole match.
pub fn span(caps: &Captures<'_>) -> (usize, usize) {
    caps.get(0).map_or((0, 0), |m| (m.start(), m.end()))
}

/// Trimmed text of group `i`, empty when the group did not participate.
pub fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str().trim())
}

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
