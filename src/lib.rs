//! Texquant - LaTeX variable and quantity conflict analysis
//!
//! This library scans prose that embeds LaTeX math, works out which physical
//! or mathematical quantity each variable stands for, and reports variables
//! used for several quantities and quantities written with several variables.
//!
//! # Features
//!
//! - **Expression extraction**: `$...$`, `$$...$$`, `\[...\]`, `\(...\)` and
//!   `<script type="math/tex">` bodies, each with a window of surrounding prose
//! - **Variable classification**: a small LaTeX lexer separating variables
//!   from formatting and operator commands
//! - **Quantity inference**: explicit `v = \text{velocity}` definitions, or
//!   phrases such as "denotes the velocity" around the expression
//! - **Conflict detection**: deterministic rows and messages for both
//!   conflict rules
//! - **Reports**: plain or Markdown tables plus JSON, with a session that
//!   remembers whether earlier warnings were resolved
//! - **Proxy fetching**: ordered CORS proxy fallback for pages refusing to be
//!   framed (network client behind the `http` feature)
//!
//! # Example - Analysing text
//!
//! ```rust
//! use texquant::{Analyzer, Document};
//!
//! let doc = Document::from_chunks([
//!     r"Let $x = \text{velocity}$ be measured first.",
//!     r"Later $x = \text{displacement}$ is used again.",
//! ]);
//! let report = Analyzer::default().analyze_document(&doc);
//!
//! assert_eq!(report.expression_count, 2);
//! assert!(report.result.has_conflicts());
//! for row in &report.result.rows {
//!     println!("{} -> {}", row.variable, row.quantity);
//! }
//! ```
//!
//! # Example - Analysing HTML with custom options
//!
//! ```rust
//! use texquant::{Analyzer, AnalyzerOptions, Document};
//!
//! # fn main() -> texquant::Result<()> {
//! let options = AnalyzerOptions::from_yaml_str("context_before: 40\nextra_ignored_commands: [vec]\n")?;
//! let doc = Document::from_html(r#"<p>Here $\vec{F}$ denotes the force.</p>"#);
//! let report = Analyzer::new(&options).analyze_document(&doc);
//!
//! assert_eq!(report.result.rows[0].variable, "F");
//! assert_eq!(report.result.rows[0].quantity, "force");
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod common;
pub mod config;
pub mod document;
pub mod extract;
pub mod latex;
pub mod proxy;
pub mod report;

pub use analysis::{AnalysisReport, AnalysisResult, Analyzer, Row, analyze};
pub use common::{Error, Result};
pub use config::AnalyzerOptions;
pub use document::{Document, TextSource};
pub use extract::{Expression, ExpressionExtractor, Expressions, Origin};
pub use report::{AnalyzerSession, CautionState, ReportOptions, TableStyle};
