//! Report rendering.
//!
//! Turns an [`AnalysisReport`](crate::analysis::AnalysisReport) into text
//! for a terminal or a Markdown document. The caution area depends on the
//! previous run, so rendering goes through an [`AnalyzerSession`] that
//! carries that state explicitly.
//!
//! # Example
//!
//! ```rust
//! use texquant::{Analyzer, Document};
//! use texquant::report::{AnalyzerSession, ReportOptions, render};
//!
//! let doc = Document::from_chunks([r"$v = \text{velocity}$"]);
//! let report = Analyzer::default().analyze_document(&doc);
//!
//! let mut session = AnalyzerSession::new();
//! let caution = session.record_now(&report.result);
//! let text = render(&report, &caution, &ReportOptions::default()).unwrap();
//! assert!(text.contains("LaTeX expressions detected: 1"));
//! ```

mod config;
mod session;
mod writer;

pub use config::{ReportOptions, TableStyle};
pub use session::{AnalyzerSession, CautionState, Resolution};
pub use writer::{render, to_json};
