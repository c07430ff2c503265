//! Behavior inference from success and error markers.
//!
//! Every grammar collects the error identifiers its language raises, throws
//! or returns, then asks [`infer_errors`] which keyword families they hit.

use regex::Regex;

use super::Behavior;

/// Keyword families that turn into `error` behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFamily {
    Expired,
    Invalid,
}

impl ErrorFamily {
    pub const ALL: [ErrorFamily; 2] = [ErrorFamily::Expired, ErrorFamily::Invalid];

    /// Substring searched for in identifiers and raw text.
    pub fn keyword(&self) -> &'static str {
        match self {
            ErrorFamily::Expired => "Expired",
            ErrorFamily::Invalid => "Invalid",
        }
    }

    /// Stimulus description used as the behavior input.
    pub fn input(&self) -> &'static str {
        match self {
            ErrorFamily::Expired => "Expired input",
            ErrorFamily::Invalid => "Invalid input",
        }
    }
}

/// Per-language error vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct ErrorVocabulary {
    /// Identifier reported when only the raw text mentions "Expired".
    pub expired: &'static str,
    /// Identifier reported when only the raw text mentions "Invalid".
    pub invalid: &'static str,
    /// Whether a raw-text mention alone is enough to report the family.
    pub text_fallback: bool,
}

impl ErrorVocabulary {
    fn default_for(&self, family: ErrorFamily) -> &'static str {
        match family {
            ErrorFamily::Expired => self.expired,
            ErrorFamily::Invalid => self.invalid,
        }
    }
}

/// Collect the first capture group of every match, in rule order, without
/// duplicates.
pub fn collect_identifiers(content: &str, rules: &[&Regex]) -> Vec<String> {
    let mut identifiers: Vec<String> = Vec::new();
    for rule in rules {
        for caps in rule.captures_iter(content) {
            if let Some(m) = caps.get(1) {
                let id = m.as_str().trim();
                if !id.is_empty() && !identifiers.iter().any(|i| i == id) {
                    identifiers.push(id.to_string());
                }
            }
        }
    }
    identifiers
}

/// Produce at most one `error` behavior per keyword family.
///
/// The first collected identifier containing the family keyword is reported.
/// Without one, the vocabulary default is reported if text fallback is on and
/// the keyword appears anywhere in `content`. `render` shapes the output,
/// e.g. wrapping it in a result type.
pub fn infer_errors<F>(
    identifiers: &[String],
    content: &str,
    vocabulary: &ErrorVocabulary,
    render: F,
) -> Vec<Behavior>
where
    F: Fn(&str) -> String,
{
    ErrorFamily::ALL
        .iter()
        .filter_map(|family| {
            let keyword = family.keyword();
            let output = identifiers
                .iter()
                .find(|id| id.contains(keyword))
                .map(String::as_str)
                .or_else(|| {
                    (vocabulary.text_fallback && content.contains(keyword))
                        .then(|| vocabulary.default_for(*family))
                })?;
            Some(Behavior::error(family.input(), render(output)))
        })
        .collect()
}
