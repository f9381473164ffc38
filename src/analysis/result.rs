// Analysis results
//
// Plain data handed to renderers. Nothing here performs I/O.

use super::aggregate::Aggregator;
use serde::Serialize;
use std::collections::BTreeSet;

/// Separator between variable and quantity key in a conflict row key.
pub const ROW_KEY_SEPARATOR: &str = "|||";

/// Build the key identifying a (variable, quantity key) row.
#[inline]
pub fn conflict_key(variable: &str, quantity_key: &str) -> String {
    format!("{}{}{}", variable, ROW_KEY_SEPARATOR, quantity_key)
}

/// One row of the variable table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub variable: String,
    /// First-seen spelling of the quantity; empty means unknown
    pub quantity: String,
    /// Lowercased quantity, empty for unknown
    pub quantity_key: String,
    /// First snippet the pair was seen in
    pub snippet: String,
}

impl Row {
    pub fn key(&self) -> String {
        conflict_key(&self.variable, &self.quantity_key)
    }

    pub fn is_unknown(&self) -> bool {
        self.quantity_key.is_empty()
    }
}

/// Output of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// Rows sorted by variable
    pub rows: Vec<Row>,
    /// Keys of rows flagged by either conflict rule
    pub conflict_row_keys: BTreeSet<String>,
    /// Human-readable conflict messages
    pub conflict_messages: Vec<String>,
}

impl AnalysisResult {
    /// Build rows and conflicts from a finished aggregation.
    pub fn from_aggregator(agg: &Aggregator) -> Self {
        let mut result = Self::default();

        for record in agg.variables() {
            if record.known_keys().count() > 1 {
                result
                    .conflict_messages
                    .push(format!("variable {} has multiple assigned quantities", record.variable));
                for key in record.known_keys() {
                    result.conflict_row_keys.insert(conflict_key(&record.variable, key));
                }
            }

            for (key, detail) in &record.quantities {
                result.rows.push(Row {
                    variable: record.variable.clone(),
                    quantity: detail.quantity.clone(),
                    quantity_key: key.clone(),
                    snippet: detail.snippets.first().cloned().unwrap_or_default(),
                });
            }
        }

        for record in agg.quantities() {
            if record.variables.len() > 1 {
                result
                    .conflict_messages
                    .push(format!("quantity {} has multiple assigned variables", record.label));
                for variable in &record.variables {
                    result.conflict_row_keys.insert(conflict_key(variable, &record.key));
                }
            }
        }

        // Stable: rows of one variable keep their first-seen quantity order
        result.rows.sort_by(|a, b| a.variable.cmp(&b.variable));
        result
    }

    /// Whether the (variable, quantity key) row is flagged.
    pub fn is_conflict(&self, variable: &str, quantity_key: &str) -> bool {
        self.conflict_row_keys
            .contains(&conflict_key(variable, quantity_key))
    }

    pub fn is_row_conflicting(&self, row: &Row) -> bool {
        self.is_conflict(&row.variable, &row.quantity_key)
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflict_messages.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
