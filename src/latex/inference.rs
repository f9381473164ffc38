// Contextual quantity inference
//
// Guesses the quantity a variable stands for from the prose around its
// expression. The heuristic looks at fixed verb phrases only; it never
// disambiguates between several candidate phrases.

use crate::common::collapse_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;

static AFTER_LEADING_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:denotes|represents|is|are|stands for|describes)\s+([^.;:,]+)")
        .expect("valid regex literal")
});

static AFTER_ANY_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:denotes|represents|is|are|stands for|describes)\s+([^.;:,]+)")
        .expect("valid regex literal")
});

static BEFORE_TRAILING_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([^.;:,]+)\s+(?:denotes|represents|is|are|stands for|describes)$")
        .expect("valid regex literal")
});

static BEFORE_NOUN_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z][A-Za-z0-9\s\-]{2,})$").expect("valid regex literal")
});

static LEADING_ARTICLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:the|a|an)\s+").expect("valid regex literal"));

/// Infer a quantity phrase from the context around an expression.
///
/// Returns an empty string when no rule matches. First match wins:
/// 1. a verb phrase at the very start of `after`
/// 2. a verb phrase anywhere in `after`
/// 3. a phrase followed by a verb at the very end of `before`
/// 4. a trailing noun-phrase-like run at the end of `before`
pub fn infer_quantity(before: &str, after: &str) -> String {
    let before = collapse_whitespace(before);
    let after = collapse_whitespace(after);

    let after_match = AFTER_LEADING_VERB
        .captures(&after)
        .or_else(|| AFTER_ANY_VERB.captures(&after));
    if let Some(phrase) = after_match.and_then(|caps| caps.get(1)) {
        return normalize_phrase(phrase.as_str());
    }

    let before_match = BEFORE_TRAILING_VERB
        .captures(&before)
        .or_else(|| BEFORE_NOUN_PHRASE.captures(&before));
    if let Some(phrase) = before_match.and_then(|caps| caps.get(1)) {
        return normalize_phrase(phrase.as_str());
    }

    String::new()
}

/// Strip a leading article and collapse whitespace.
pub fn normalize_phrase(phrase: &str) -> String {
    let stripped = LEADING_ARTICLE.replace(phrase.trim_start(), "");
    collapse_whitespace(&stripped)
}
