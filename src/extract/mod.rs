//! Expression extraction.
//!
//! Scans the text chunks of a [`TextSource`] for the four math delimiter
//! pairs and yields one [`Expression`] per match, carrying a bounded window
//! of surrounding prose for the inference heuristics. Math script bodies
//! are appended after all chunks.
//!
//! # Example
//!
//! ```rust
//! use texquant::{AnalyzerOptions, Document, ExpressionExtractor};
//!
//! let doc = Document::from_chunks(["Let $v$ denote the speed."]);
//! let extractor = ExpressionExtractor::new(&AnalyzerOptions::default());
//! let expressions: Vec<_> = extractor.extract(&doc).collect();
//! assert_eq!(expressions.len(), 1);
//! assert_eq!(expressions[0].latex, "v");
//! assert_eq!(expressions[0].snippet, "Let $v$ denote the speed.");
//! ```

mod delimiters;
mod snippet;

pub use delimiters::Origin;
pub use snippet::build_snippet;

use crate::common::text::{char_window_after, char_window_before, might_contain_math};
use crate::config::{AnalyzerOptions, MIN_SNIPPET_LIMIT};
use crate::document::TextSource;
use delimiters::PASSES;
use serde::Serialize;

/// A math expression found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expression {
    /// Latex body without delimiters
    pub latex: String,
    /// Prose immediately before the match
    pub context_before: String,
    /// Prose immediately after the match
    pub context_after: String,
    /// Whitespace-collapsed excerpt for display
    pub snippet: String,
    /// Which delimiter produced the match
    pub origin: Origin,
}

/// Extracts [`Expression`]s from a text source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionExtractor {
    context_before: usize,
    context_after: usize,
    snippet_limit: usize,
    scan_math_scripts: bool,
}

impl Default for ExpressionExtractor {
    fn default() -> Self {
        Self::new(&AnalyzerOptions::default())
    }
}

impl ExpressionExtractor {
    /// Create an extractor from analyzer options.
    pub fn new(options: &AnalyzerOptions) -> Self {
        Self {
            context_before: options.context_before,
            context_after: options.context_after,
            snippet_limit: options.snippet_limit.max(MIN_SNIPPET_LIMIT),
            scan_math_scripts: options.scan_math_scripts,
        }
    }

    /// Lazily extract expressions from `source`.
    ///
    /// Each call starts a fresh scan; the returned iterator can also be
    /// cloned to replay it from its current position.
    pub fn extract<'a, S>(&self, source: &'a S) -> Expressions<'a>
    where
        S: TextSource + ?Sized,
    {
        let scripts = if self.scan_math_scripts {
            source.math_scripts().collect()
        } else {
            Vec::new()
        };

        Expressions {
            extractor: *self,
            chunks: source.text_chunks().collect(),
            scripts,
            chunk: 0,
            pass: 0,
            pos: 0,
            script: 0,
        }
    }

    fn expression_at(&self, text: &str, start: usize, end: usize, latex: &str, origin: Origin) -> Expression {
        let context_before = char_window_before(text, start, self.context_before);
        let context_after = char_window_after(text, end, self.context_after);

        Expression {
            latex: latex.to_string(),
            context_before: context_before.to_string(),
            context_after: context_after.to_string(),
            snippet: build_snippet(context_before, latex, context_after, self.snippet_limit),
            origin,
        }
    }

    fn script_expression(&self, body: &str) -> Expression {
        Expression {
            latex: body.to_string(),
            context_before: String::new(),
            context_after: String::new(),
            snippet: build_snippet("", body, "", self.snippet_limit),
            origin: Origin::Script,
        }
    }
}

/// Lazy, finite stream of expressions from one source.
///
/// Within a chunk, all inline matches come first, then display, bracket and
/// paren matches. Script expressions follow the last chunk.
#[derive(Debug, Clone)]
pub struct Expressions<'a> {
    extractor: ExpressionExtractor,
    chunks: Vec<&'a str>,
    scripts: Vec<&'a str>,
    chunk: usize,
    pass: usize,
    pos: usize,
    script: usize,
}

impl Expressions<'_> {
    fn next_in_chunks(&mut self) -> Option<Expression> {
        while let Some(&text) = self.chunks.get(self.chunk) {
            if self.pass >= PASSES.len() || !might_contain_math(text) {
                self.chunk += 1;
                self.pass = 0;
                self.pos = 0;
                continue;
            }

            let (origin, regex) = &PASSES[self.pass];
            let Some(caps) = regex.captures_at(text, self.pos) else {
                self.pass += 1;
                self.pos = 0;
                continue;
            };

            let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
                self.pass += 1;
                self.pos = 0;
                continue;
            };
            self.pos = whole.end();

            // Display math seen through the single-dollar pattern
            if *origin == Origin::Inline && whole.as_str().contains("$$") {
                continue;
            }
            if body.as_str().is_empty() {
                continue;
            }

            return Some(self.extractor.expression_at(
                text,
                whole.start(),
                whole.end(),
                body.as_str(),
                *origin,
            ));
        }
        None
    }

    fn next_in_scripts(&mut self) -> Option<Expression> {
        while let Some(&body) = self.scripts.get(self.script) {
            self.script += 1;
            let body = body.trim();
            if !body.is_empty() {
                return Some(self.extractor.script_expression(body));
            }
        }
        None
    }
}

impl Iterator for Expressions<'_> {
    type Item = Expression;

    fn next(&mut self) -> Option<Expression> {
        self.next_in_chunks().or_else(|| self.next_in_scripts())
    }
}
