//! Configuration types for report rendering.
//!
//! # Examples
//!
//! ```rust
//! use texquant::report::{ReportOptions, TableStyle};
//!
//! let options = ReportOptions::new()
//!     .with_table_style(TableStyle::Markdown)
//!     .with_unknown_label("?");
//! ```
use serde::{Deserialize, Serialize};

/// Options for rendering an analysis report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// How to render the variable table
    pub table_style: TableStyle,
    /// Text shown for a variable with no known quantity
    pub unknown_label: String,
    /// Whether the snippet column is rendered
    pub include_snippets: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            table_style: TableStyle::Plain,
            unknown_label: "unknown".to_string(),
            include_snippets: true,
        }
    }
}

impl ReportOptions {
    /// Create a new `ReportOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table rendering style.
    #[inline]
    pub fn with_table_style(mut self, style: TableStyle) -> Self {
        self.table_style = style;
        self
    }

    /// Set the label used for unknown quantities.
    #[inline]
    pub fn with_unknown_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_label = label.into();
        self
    }

    /// Set whether the snippet column is rendered.
    #[inline]
    pub fn with_snippets(mut self, include: bool) -> Self {
        self.include_snippets = include;
        self
    }
}

/// Table rendering styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStyle {
    /// Space-aligned columns; conflicting cells end with `!`
    #[default]
    Plain,
    /// Markdown pipe table; conflicting cells are bold
    Markdown,
}
