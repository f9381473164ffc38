use crate::common::text::{collapse_whitespace, truncate_with_ellipsis};

/// Build the display snippet for an expression.
///
/// The context and the `$`-wrapped latex are joined, whitespace is
/// collapsed, and the result is cut to `limit` characters with a trailing
/// ellipsis when longer.
pub fn build_snippet(before: &str, latex: &str, after: &str, limit: usize) -> String {
    let raw = format!("{}${}${}", before, latex, after);
    truncate_with_ellipsis(collapse_whitespace(&raw), limit)
}
