// Occurrence aggregation
//
// Folds (variable, quantity, snippet) occurrences into per-variable and
// per-quantity records. Records keep first-seen order so that the rows and
// messages built from them are deterministic.

use smallvec::SmallVec;
use std::collections::HashMap;

/// One quantity recorded against a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityDetail {
    /// Quantity as first written; empty means unknown
    pub quantity: String,
    /// Unique snippets in order of first appearance
    pub snippets: SmallVec<[String; 2]>,
}

/// Everything recorded for one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRecord {
    pub variable: String,
    /// Quantity key (lowercased, empty for unknown) to detail
    pub quantities: Vec<(String, QuantityDetail)>,
}

impl VariableRecord {
    fn detail_mut(&mut self, key: &str, quantity: &str) -> &mut QuantityDetail {
        let index = match self.quantities.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.quantities.push((
                    key.to_string(),
                    QuantityDetail {
                        quantity: quantity.to_string(),
                        snippets: SmallVec::new(),
                    },
                ));
                self.quantities.len() - 1
            },
        };
        &mut self.quantities[index].1
    }

    /// Distinct non-empty quantity keys.
    pub fn known_keys(&self) -> impl Iterator<Item = &str> {
        self.quantities
            .iter()
            .map(|(key, _)| key.as_str())
            .filter(|key| !key.is_empty())
    }
}

/// Everything recorded for one quantity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityRecord {
    pub key: String,
    /// Display label, first-seen casing
    pub label: String,
    /// Variables claiming this quantity, in first-seen order
    pub variables: Vec<String>,
}

/// Accumulates occurrences for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    variables: Vec<VariableRecord>,
    variable_index: HashMap<String, usize>,
    quantities: Vec<QuantityRecord>,
    quantity_index: HashMap<String, usize>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence.
    ///
    /// Blank variables are dropped. An empty quantity is kept on the
    /// variable as "unknown" but never claims a quantity record.
    pub fn register(&mut self, variable: &str, quantity: &str, snippet: &str) {
        let variable = variable.trim();
        if variable.is_empty() {
            return;
        }
        let quantity = quantity.trim();
        let key = quantity.to_lowercase();

        let index = match self.variable_index.get(variable) {
            Some(&index) => index,
            None => {
                self.variables.push(VariableRecord {
                    variable: variable.to_string(),
                    quantities: Vec::new(),
                });
                self.variable_index
                    .insert(variable.to_string(), self.variables.len() - 1);
                self.variables.len() - 1
            },
        };
        let detail = self.variables[index].detail_mut(&key, quantity);
        if !snippet.is_empty() && !detail.snippets.iter().any(|s| s == snippet) {
            detail.snippets.push(snippet.to_string());
        }

        if quantity.is_empty() {
            return;
        }
        let index = match self.quantity_index.get(&key) {
            Some(&index) => index,
            None => {
                self.quantities.push(QuantityRecord {
                    key: key.clone(),
                    label: quantity.to_string(),
                    variables: Vec::new(),
                });
                self.quantity_index.insert(key, self.quantities.len() - 1);
                self.quantities.len() - 1
            },
        };
        let record = &mut self.quantities[index];
        if !record.variables.iter().any(|v| v == variable) {
            record.variables.push(variable.to_string());
        }
    }

    pub fn variables(&self) -> &[VariableRecord] {
        &self.variables
    }

    pub fn quantities(&self) -> &[QuantityRecord] {
        &self.quantities
    }

    pub fn variable(&self, name: &str) -> Option<&VariableRecord> {
        self.variable_index.get(name).map(|&i| &self.variables[i])
    }

    pub fn quantity(&self, key: &str) -> Option<&QuantityRecord> {
        self.quantity_index.get(key).map(|&i| &self.quantities[i])
    }
}
