//! Result records shared by every language analyzer.
//!
//! The serialized form of [`AnalysisResult`] is the wire format consumed by
//! reporting layers:
//!
//! ```text
//! { path, exports: { functions, types, classes },
//!   dependencies: { external, internal }, behaviors, analyzedFiles }
//! ```

use serde::{Deserialize, Serialize};

/// An exported function or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedFunction {
    pub name: String,
    /// Rendered call form, e.g. `ValidateToken(token string) (Claims, error)`.
    pub signature: String,
    /// Summary line of the adjacent doc comment, empty when none was found.
    #[serde(default)]
    pub description: String,
}

/// An exported type (interface, struct, enum, trait, dataclass, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedType {
    pub name: String,
    /// Free-form tag: `struct`, `interface`, `enum`, `exception`, ...
    pub kind: String,
    pub definition: String,
    #[serde(default)]
    pub description: String,
}

/// An exported class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedClass {
    pub name: String,
    pub signature: String,
    #[serde(default)]
    pub description: String,
}

/// Everything a file exposes, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exports {
    pub functions: Vec<ExportedFunction>,
    pub types: Vec<ExportedType>,
    pub classes: Vec<ExportedClass>,
}

impl Exports {
    /// Returns true if no function, type or class was recognized.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.types.is_empty() && self.classes.is_empty()
    }

    /// Append another file's exports. No deduplication across files.
    pub fn extend(&mut self, other: Exports) {
        self.functions.extend(other.functions);
        self.types.extend(other.types);
        self.classes.extend(other.classes);
    }
}

/// Referenced modules, split into third-party and in-project references.
///
/// Both lists are kept free of duplicates; the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependencies {
    pub external: Vec<String>,
    pub internal: Vec<String>,
}

impl Dependencies {
    pub fn is_empty(&self) -> bool {
        self.external.is_empty() && self.internal.is_empty()
    }

    /// Add an external reference unless already present.
    pub fn add_external(&mut self, dep: impl Into<String>) {
        push_unique(&mut self.external, dep.into());
    }

    /// Add an internal reference unless already present.
    pub fn add_internal(&mut self, dep: impl Into<String>) {
        push_unique(&mut self.internal, dep.into());
    }

    /// Merge another dependency set, preserving first-seen order.
    pub fn merge(&mut self, other: Dependencies) {
        for dep in other.external {
            self.add_external(dep);
        }
        for dep in other.internal {
            self.add_internal(dep);
        }
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

/// Whether an inferred behavior describes a successful or failing outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorCategory {
    Success,
    Error,
}

impl BehaviorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorCategory::Success => "success",
            BehaviorCategory::Error => "error",
        }
    }
}

impl std::fmt::Display for BehaviorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inferred (input, output, category) triple.
///
/// Behaviors are signals for documentation, not verified contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Behavior {
    pub input: String,
    pub output: String,
    pub category: BehaviorCategory,
}

impl Behavior {
    pub fn success(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            category: BehaviorCategory::Success,
        }
    }

    pub fn error(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            category: BehaviorCategory::Error,
        }
    }
}

/// Summary of a single file or a whole directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// The file or directory that was analyzed.
    pub path: String,
    pub exports: Exports,
    pub dependencies: Dependencies,
    pub behaviors: Vec<Behavior>,
    /// Base names of the files that contributed to this result.
    pub analyzed_files: Vec<String>,
}

impl AnalysisResult {
    /// A result with only the path set.
    pub fn empty(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Fold a file-level result into this aggregate.
    ///
    /// Exports and behaviors are concatenated, dependencies merged without
    /// duplicates, and the file's analyzed names appended. `path` is left
    /// untouched.
    pub fn absorb(&mut self, file: AnalysisResult) {
        self.exports.extend(file.exports);
        self.dependencies.merge(file.dependencies);
        self.behaviors.extend(file.behaviors);
        self.analyzed_files.extend(file.analyzed_files);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(name: &str) -> ExportedFunction {
        ExportedFunction {
            name: name.to_string(),
            signature: format!("{}()", name),
            description: String::new(),
        }
    }

    #[test]
    fn test_dependencies_keep_first_occurrence() {
        let mut deps = Dependencies::default();
        deps.add_external("serde");
        deps.add_external("regex");
        deps.add_external("serde");
        deps.add_internal("./a");
        deps.add_internal("./a");

        assert_eq!(deps.external, vec!["serde", "regex"]);
        assert_eq!(deps.internal, vec!["./a"]);
    }

    #[test]
    fn test_absorb_concatenates_exports_and_dedups_dependencies() {
        let mut total = AnalysisResult::empty("pkg");

        let mut first = AnalysisResult::empty("pkg/a.go");
        first.exports.functions.push(function("Foo"));
        first.dependencies.add_external("github.com/x/y");
        first.analyzed_files.push("a.go".to_string());

        let mut second = AnalysisResult::empty("pkg/b.go");
        second.exports.functions.push(function("Foo"));
        second.dependencies.add_external("github.com/x/y");
        second.dependencies.add_external("golang.org/x/net");
        second.behaviors.push(Behavior::success("Valid input", "Value"));
        second.analyzed_files.push("b.go".to_string());

        total.absorb(first);
        total.absorb(second);

        assert_eq!(total.path, "pkg");
        assert_eq!(total.exports.functions.len(), 2);
        assert_eq!(
            total.dependencies.external,
            vec!["github.com/x/y", "golang.org/x/net"]
        );
        assert_eq!(total.behaviors.len(), 1);
        assert_eq!(total.analyzed_files, vec!["a.go", "b.go"]);
    }

    #[test]
    fn test_serialized_shape() {
        let mut result = AnalysisResult::empty("lib.rs");
        result.behaviors.push(Behavior::error("Expired input", "TokenError::Expired"));
        result.analyzed_files.push("lib.rs".to_string());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["path"], "lib.rs");
        assert!(json["exports"]["functions"].is_array());
        assert!(json["exports"]["types"].is_array());
        assert!(json["exports"]["classes"].is_array());
        assert!(json["dependencies"]["external"].is_array());
        assert!(json["dependencies"]["internal"].is_array());
        assert_eq!(json["behaviors"][0]["category"], "error");
        assert_eq!(json["analyzedFiles"][0], "lib.rs");
    }
}
