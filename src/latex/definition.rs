// Definition and variable extraction
//
// Turns one latex body into variable/quantity bindings. Explicit equations
// such as `v = \text{velocity}` win; otherwise every candidate variable is
// paired with whatever the surrounding prose suggests.

use super::commands::IgnoreList;
use super::inference::infer_quantity;
use super::token::extract_variables;
use crate::common::collapse_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Variable token: a letter or command, then lazily more alphanumerics and
/// an optional subscript.
const VARIABLE_PATTERN: &str =
    r"(?:\\[a-zA-Z]+|[a-zA-Z])[a-zA-Z0-9]*?(?:_\{[^}]+\}|_[a-zA-Z0-9])?";

/// `<var> = \text{<quantity>}`
static FORWARD_EQUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"({})\s*(?:=|:=|\\equiv)\s*\\text\{{([^}}]+)\}}",
        VARIABLE_PATTERN
    ))
    .expect("valid regex literal")
});

/// `\text{<quantity>} = <var>`
static MIRRORED_EQUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\\text\{{([^}}]+)\}}\s*(?:=|:=|\\equiv)\s*({})",
        VARIABLE_PATTERN
    ))
    .expect("valid regex literal")
});

static TEXT_WRAPPERS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [r"\\text\{([^}]*)\}", r"\\mathrm\{([^}]*)\}", r"\\operatorname\{([^}]*)\}"]
        .map(|pattern| Regex::new(pattern).expect("valid regex literal"))
});

static ANY_COMMAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[a-zA-Z]+").expect("valid regex literal"));

static STRUCTURAL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[{}_^]").expect("valid regex literal"));

/// A variable bound to a quantity.
///
/// The quantity is empty for bindings that come from a variable nobody
/// described.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Definition {
    pub variable: String,
    pub quantity: String,
}

impl Definition {
    pub fn new(variable: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            quantity: quantity.into(),
        }
    }
}

/// Clean a raw quantity captured from `\text{...}`.
pub fn clean_quantity(raw: &str) -> String {
    let mut text = raw.to_string();
    for wrapper in TEXT_WRAPPERS.iter() {
        text = wrapper.replace_all(&text, "${1}").into_owned();
    }
    let text = ANY_COMMAND.replace_all(&text, " ");
    let text = STRUCTURAL_CHARS.replace_all(&text, " ");
    collapse_whitespace(&text)
}

/// Whether a captured variable is an ignored command such as `\frac`.
fn is_ignored_variable(variable: &str, ignore: &IgnoreList) -> bool {
    let Some(command) = variable.strip_prefix('\\') else {
        return false;
    };
    let name_len = command
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    name_len > 0 && ignore.contains(&command[..name_len])
}

/// Extract explicit equation-style definitions.
///
/// All forward matches come before all mirrored matches.
pub fn explicit_definitions(latex: &str, ignore: &IgnoreList) -> Vec<Definition> {
    let patterns: [(&Regex, usize, usize); 2] =
        [(&*FORWARD_EQUATION, 1, 2), (&*MIRRORED_EQUATION, 2, 1)];

    let mut definitions = Vec::new();
    for (pattern, variable_index, quantity_index) in patterns {
        for caps in pattern.captures_iter(latex) {
            let variable = caps
                .get(variable_index)
                .map(|m| m.as_str().trim())
                .unwrap_or_default();
            if variable.is_empty() || is_ignored_variable(variable, ignore) {
                continue;
            }
            let quantity = caps
                .get(quantity_index)
                .map(|m| clean_quantity(m.as_str()))
                .unwrap_or_default();
            if !quantity.is_empty() {
                definitions.push(Definition::new(variable, quantity));
            }
        }
    }
    definitions
}

/// Every binding an expression contributes to the analysis.
///
/// Explicit definitions are returned as-is when present. Otherwise every
/// candidate variable is paired with the quantity inferred from context,
/// which is empty when the context says nothing useful.
pub fn extract_bindings(
    latex: &str,
    context_before: &str,
    context_after: &str,
    ignore: &IgnoreList,
) -> Vec<Definition> {
    let explicit = explicit_definitions(latex, ignore);
    if !explicit.is_empty() {
        return explicit;
    }

    let variables = extract_variables(latex, ignore);
    if variables.is_empty() {
        return Vec::new();
    }

    // Inference reads only the context, so one guess serves every variable
    let inferred = infer_quantity(context_before, context_after);
    variables
        .into_iter()
        .map(|variable| Definition::new(variable, inferred.clone()))
        .collect()
}

/// Definitions with a non-empty quantity, explicit or inferred.
pub fn extract_definitions(
    latex: &str,
    context_before: &str,
    context_after: &str,
    ignore: &IgnoreList,
) -> Vec<Definition> {
    extract_bindings(latex, context_before, context_after, ignore)
        .into_iter()
        .filter(|def| !def.quantity.is_empty())
        .collect()
}
