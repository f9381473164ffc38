//! Variable/quantity aggregation and conflict detection.
//!
//! An analysis run folds every expression of a document into per-variable
//! and per-quantity records, then flags:
//! - a variable bound to two or more distinct non-empty quantities
//! - a quantity claimed by two or more variables
//!
//! Runs are total and deterministic: the same input always produces the
//! same rows in the same order and the same messages.
//!
//! # Example
//!
//! ```rust
//! use texquant::{Analyzer, AnalyzerOptions, Document};
//!
//! let doc = Document::from_chunks([r"Let $x = \text{velocity}$ and $x = \text{displacement}$."]);
//! let report = Analyzer::new(&AnalyzerOptions::default()).analyze_document(&doc);
//! assert_eq!(report.result.conflict_messages, vec![
//!     "variable x has multiple assigned quantities".to_string()
//! ]);
//! assert!(report.result.is_conflict("x", "velocity"));
//! ```

mod aggregate;
mod result;

pub use aggregate::{Aggregator, QuantityDetail, QuantityRecord, VariableRecord};
pub use result::{AnalysisResult, ROW_KEY_SEPARATOR, Row, conflict_key};

use crate::config::AnalyzerOptions;
use crate::document::TextSource;
use crate::extract::{Expression, ExpressionExtractor};
use crate::latex::{IgnoreList, extract_bindings};
use serde::Serialize;

/// Result of analysing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    /// Number of expressions scanned
    pub expression_count: usize,
}

/// Extracts and analyses expressions with one set of options.
#[derive(Debug, Clone)]
pub struct Analyzer {
    extractor: ExpressionExtractor,
    ignore: IgnoreList,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&AnalyzerOptions::default())
    }
}

impl Analyzer {
    pub fn new(options: &AnalyzerOptions) -> Self {
        Self {
            extractor: ExpressionExtractor::new(options),
            ignore: IgnoreList::with_extra(&options.extra_ignored_commands),
        }
    }

    pub fn extractor(&self) -> &ExpressionExtractor {
        &self.extractor
    }

    /// Analyse an already extracted expression stream.
    pub fn analyze_expressions<'e, I>(&self, expressions: I) -> AnalysisResult
    where
        I: IntoIterator<Item = &'e Expression>,
    {
        let mut agg = Aggregator::new();
        for expression in expressions {
            let bindings = extract_bindings(
                &expression.latex,
                &expression.context_before,
                &expression.context_after,
                &self.ignore,
            );
            for binding in bindings {
                agg.register(&binding.variable, &binding.quantity, &expression.snippet);
            }
        }
        AnalysisResult::from_aggregator(&agg)
    }

    /// Extract every expression from `source` and analyse them.
    pub fn analyze_document<S>(&self, source: &S) -> AnalysisReport
    where
        S: TextSource + ?Sized,
    {
        let expressions: Vec<Expression> = self.extractor.extract(source).collect();
        let result = self.analyze_expressions(&expressions);

        tracing::debug!(
            expressions = expressions.len(),
            rows = result.rows.len(),
            conflicts = result.conflict_messages.len(),
            "analysis run finished"
        );

        AnalysisReport {
            result,
            expression_count: expressions.len(),
        }
    }
}

/// Analyse expressions with the default ignore list.
pub fn analyze<'e, I>(expressions: I) -> AnalysisResult
where
    I: IntoIterator<Item = &'e Expression>,
{
    Analyzer::default().analyze_expressions(expressions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use proptest::prelude::*;

    fn run(chunks: &[&str]) -> AnalysisReport {
        let doc = Document::from_chunks(chunks.iter().copied());
        Analyzer::default().analyze_document(&doc)
    }

    fn pairs(result: &AnalysisResult) -> Vec<(&str, &str)> {
        result
            .rows
            .iter()
            .map(|r| (r.variable.as_str(), r.quantity.as_str()))
            .collect()
    }

    #[test]
    fn test_variable_with_two_quantities() {
        let report = run(&[r"Let $x = \text{velocity}$ and $x = \text{displacement}$."]);
        let result = &report.result;

        assert_eq!(result.conflict_messages, vec!["variable x has multiple assigned quantities"]);
        assert!(result.is_conflict("x", "velocity"));
        assert!(result.is_conflict("x", "displacement"));
        assert_eq!(pairs(result), vec![("x", "velocity"), ("x", "displacement")]);
        assert_eq!(report.expression_count, 2);
    }

    #[test]
    fn test_quantity_with_two_variables() {
        let report = run(&[r"$E = \text{energy}$ and later $m = \text{energy}$."]);
        let result = &report.result;

        assert_eq!(result.conflict_messages, vec!["quantity energy has multiple assigned variables"]);
        assert!(result.is_conflict("E", "energy"));
        assert!(result.is_conflict("m", "energy"));
    }

    #[test]
    fn test_single_definition() {
        let result = run(&[r"$v = \text{velocity}$"]).result;
        assert!(result.conflict_messages.is_empty());
        assert!(result.conflict_row_keys.is_empty());
        assert_eq!(pairs(&result), vec![("v", "velocity")]);
        assert_eq!(result.rows[0].snippet, r"$v = \text{velocity}$");
    }

    #[test]
    fn test_ignored_commands_not_variables() {
        let result = run(&[r"$\frac{a}{b}$"]).result;
        assert_eq!(pairs(&result), vec![("a", ""), ("b", "")]);
        assert!(result.rows.iter().all(Row::is_unknown));
        assert!(!result.has_conflicts());
    }

    #[test]
    fn test_quantity_keys_case_insensitive() {
        let result = run(&[r"$v = \text{Velocity}$", r"$v = \text{velocity}$"]).result;
        assert!(result.conflict_messages.is_empty());
        assert_eq!(pairs(&result), vec![("v", "Velocity")]);
        assert_eq!(result.rows[0].quantity_key, "velocity");
    }

    #[test]
    fn test_unknown_quantity_does_not_count_as_distinct() {
        let result = run(&[r"$v = \text{speed}$", "$v + 1$"]).result;
        assert!(!result.has_conflicts());
        assert_eq!(pairs(&result), vec![("v", "speed"), ("v", "")]);
    }

    #[test]
    fn test_unknown_row_not_flagged_when_variable_conflicts() {
        let result = run(&[r"$x = \text{a}$", r"$x = \text{b}$", "$x$"]).result;
        assert!(result.is_conflict("x", "a"));
        assert!(result.is_conflict("x", "b"));
        assert!(!result.is_conflict("x", ""));
    }

    #[test]
    fn test_both_rules_accumulate() {
        let result = run(&[
            r"$x = \text{length}$",
            r"$x = \text{width}$",
            r"$y = \text{width}$",
        ])
        .result;
        assert_eq!(result.conflict_messages, vec![
            "variable x has multiple assigned quantities",
            "quantity width has multiple assigned variables",
        ]);
        assert!(result.is_conflict("x", "length"));
        assert!(result.is_conflict("x", "width"));
        assert!(result.is_conflict("y", "width"));
        assert_eq!(result.conflict_row_keys.len(), 3);
    }

    #[test]
    fn test_rows_sorted_by_variable() {
        let result = run(&[r"$z = \text{c}$ $b = \text{a}$ $B = \text{d}$"]).result;
        let names: Vec<_> = result.rows.iter().map(|r| r.variable.as_str()).collect();
        assert_eq!(names, vec!["B", "b", "z"]);
    }

    #[test]
    fn test_context_inference() {
        let result = run(&["Here $p$ denotes the momentum of the particle."]).result;
        assert_eq!(pairs(&result), vec![("p", "momentum of the particle")]);
    }

    #[test]
    fn test_conflict_row_key_format() {
        let result = run(&[r"$E = \text{energy}$ $m = \text{energy}$"]).result;
        assert!(result.conflict_row_keys.contains("E|||energy"));
        assert_eq!(result.rows[0].key(), "E|||energy");
    }

    #[test]
    fn test_extra_ignored_commands() {
        let options = AnalyzerOptions::new().with_ignored_command("vec");
        let doc = Document::from_chunks([r"$\vec{F}$"]);
        let result = Analyzer::new(&options).analyze_document(&doc).result;
        assert_eq!(pairs(&result), vec![("F", "")]);
    }

    #[test]
    fn test_multiline_display_math_in_text_file() {
        let doc = Document::from_paragraphs(
            "We first set $m = \\text{energy}$ and then write\n$$\nE = \\text{energy}\n$$\nfor the rest.\n",
        );
        let report = Analyzer::default().analyze_document(&doc);
        assert_eq!(report.expression_count, 2);
        assert_eq!(pairs(&report.result), vec![("E", "energy"), ("m", "energy")]);
        assert!(report.result.is_conflict("E", "energy"));
    }

    #[test]
    fn test_inference_across_line_breaks() {
        let doc = Document::from_paragraphs("Here the symbol\n$p$\ndenotes the momentum.");
        let result = Analyzer::default().analyze_document(&doc).result;
        assert_eq!(pairs(&result), vec![("p", "momentum")]);
    }

    #[test]
    fn test_no_math_gives_empty_result() {
        let report = run(&["nothing to see here"]);
        assert!(report.result.is_empty());
        assert_eq!(report.expression_count, 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_analysis_is_idempotent(
            vars in proptest::collection::vec("[a-zA-Z]", 1..6),
            quantities in proptest::collection::vec("[a-zA-Z]{1,8}", 1..6),
        ) {
            let text: String = vars
                .iter()
                .zip(quantities.iter().cycle())
                .map(|(v, q)| format!(r"${} = \text{{{}}}$ ", v, q))
                .collect();
            let first = run(&[text.as_str()]);
            let second = run(&[text.as_str()]);
            prop_assert_eq!(&first.result.rows, &second.result.rows);
            prop_assert_eq!(&first.result.conflict_messages, &second.result.conflict_messages);
            prop_assert_eq!(first, second);
        }
    }
}
