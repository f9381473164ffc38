// Math delimiter patterns
//
// One non-greedy pattern per delimiter pair, scanned in this order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Delimiter that produced an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// `$...$`
    Inline,
    /// `$$...$$`
    Display,
    /// `\[...\]`
    Bracket,
    /// `\(...\)`
    Paren,
    /// `<script type="math/tex">` body
    Script,
}

pub(super) static PASSES: Lazy<[(Origin, Regex); 4]> = Lazy::new(|| {
    [
        (Origin::Inline, r"(?s)\$(.+?)\$"),
        (Origin::Display, r"(?s)\$\$(.+?)\$\$"),
        (Origin::Bracket, r"(?s)\\\[(.+?)\\\]"),
        (Origin::Paren, r"(?s)\\\((.+?)\\\)"),
    ]
    .map(|(origin, pattern)| (origin, Regex::new(pattern).expect("valid regex literal")))
});
