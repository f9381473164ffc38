//! Configuration types for the variable analyzer.
//!
//! `AnalyzerOptions` controls how expressions are cut out of a document and
//! which LaTeX commands are never treated as variables. Options can be built
//! in code or loaded from a YAML file.
//!
//! # Examples
//!
//! ```rust
//! use texquant::AnalyzerOptions;
//!
//! // Create with defaults
//! let options = AnalyzerOptions::default();
//! assert_eq!(options.context_before, 80);
//!
//! // Or customize
//! let options = AnalyzerOptions::new()
//!     .with_context_after(60)
//!     .with_ignored_command("mathcal");
//! ```
use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Characters of context kept before a match.
pub const DEFAULT_CONTEXT_BEFORE: usize = 80;
/// Characters of context kept after a match.
pub const DEFAULT_CONTEXT_AFTER: usize = 120;
/// Maximum snippet length in characters, ellipsis included.
pub const DEFAULT_SNIPPET_LIMIT: usize = 160;
/// Smallest snippet limit that still keeps a character before the ellipsis.
pub const MIN_SNIPPET_LIMIT: usize = 4;

/// Options for expression extraction and variable classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerOptions {
    /// Context window before each match, in characters
    pub context_before: usize,
    /// Context window after each match, in characters
    pub context_after: usize,
    /// Snippet length limit, in characters
    pub snippet_limit: usize,
    /// Command names ignored in addition to the built-in list
    pub extra_ignored_commands: Vec<String>,
    /// Whether `math/tex` script bodies are scanned
    pub scan_math_scripts: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            context_before: DEFAULT_CONTEXT_BEFORE,
            context_after: DEFAULT_CONTEXT_AFTER,
            snippet_limit: DEFAULT_SNIPPET_LIMIT,
            extra_ignored_commands: Vec::new(),
            scan_math_scripts: true,
        }
    }
}

impl AnalyzerOptions {
    /// Create a new `AnalyzerOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the context window before each match.
    #[inline]
    pub fn with_context_before(mut self, chars: usize) -> Self {
        self.context_before = chars;
        self
    }

    /// Set the context window after each match.
    #[inline]
    pub fn with_context_after(mut self, chars: usize) -> Self {
        self.context_after = chars;
        self
    }

    /// Set the snippet length limit, raised to [`MIN_SNIPPET_LIMIT`] if lower.
    #[inline]
    pub fn with_snippet_limit(mut self, chars: usize) -> Self {
        self.snippet_limit = chars.max(MIN_SNIPPET_LIMIT);
        self
    }

    /// Add a command name (without the backslash) to the ignore list.
    #[inline]
    pub fn with_ignored_command(mut self, name: impl Into<String>) -> Self {
        self.extra_ignored_commands.push(name.into());
        self
    }

    /// Set whether `math/tex` script bodies are scanned.
    #[inline]
    pub fn with_math_scripts(mut self, scan: bool) -> Self {
        self.scan_math_scripts = scan;
        self
    }

    /// Parse options from a YAML document.
    ///
    /// Missing keys fall back to their defaults; unknown keys are rejected.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: Self = serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading analyzer options");
        Self::from_yaml_str(&yaml)
    }

    /// Serialize options to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize options: {}", e)))
    }

    /// Reject option combinations the extractor cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.snippet_limit < MIN_SNIPPET_LIMIT {
            return Err(Error::Config(format!(
                "snippet_limit must be at least {}",
                MIN_SNIPPET_LIMIT
            )));
        }
        if let Some(bad) = self
            .extra_ignored_commands
            .iter()
            .find(|name| name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(Error::Config(format!(
                "ignored command '{}' must be ASCII letters without a backslash",
                bad
            )));
        }
        Ok(())
    }
}
