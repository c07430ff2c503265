//! Configuration file for codebrief.
//!
//! Every field is optional; command-line flags take precedence over the
//! file, and the file over built-in defaults.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::Language;
use crate::report::Format;

/// Default config file names to search for, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["codebrief.yaml", ".codebrief.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Language id used when none is given on the command line.
    #[serde(default)]
    pub language: Option<String>,
    /// "json" (default) or "pretty"
    #[serde(default)]
    pub format: Option<String>,
    /// Explicit file list for directory analysis, relative to the directory.
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Parse a config from YAML text. An empty document is the default config.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }
}

/// Find a config file in `dir` using the default names.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if let Some(language) = &config.language {
        if Language::from_id(language).is_none() {
            anyhow::bail!(
                "invalid language {:?}, must be one of: {}",
                language,
                Language::ALL.map(|l| l.id()).join(", ")
            );
        }
    }

    if let Some(format) = &config.format {
        format.parse::<Format>()?;
    }

    if let Some(files) = &config.files {
        for name in files {
            if Path::new(name).is_absolute() {
                anyhow::bail!("files entry {:?} must be relative to the analyzed directory", name);
            }
        }
    }

    Ok(())
}
