//! Small string helpers shared by the extractor and the inference heuristics.
//!
//! All windowing here counts `char`s rather than bytes so that context
//! windows never split a UTF-8 code point.

use memchr::memchr2;

/// Ellipsis appended to truncated snippets.
pub const ELLIPSIS: char = '…';

/// Fast check whether a text chunk can contain any math delimiter at all.
///
/// Every delimiter starts with either `$` or `\`, so chunks without those
/// bytes are skipped before any regex runs.
#[inline]
pub fn might_contain_math(text: &str) -> bool {
    memchr2(b'$', b'\\', text.as_bytes()).is_some()
}

/// Collapse every run of whitespace into a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }

    out
}

/// Return at most `max_chars` characters ending at byte offset `end`.
#[inline]
pub fn char_window_before(text: &str, end: usize, max_chars: usize) -> &str {
    let head = &text[..end];
    match head.char_indices().rev().nth(max_chars.saturating_sub(1)) {
        Some((idx, _)) if max_chars > 0 => &head[idx..],
        _ if max_chars == 0 => "",
        _ => head,
    }
}

/// Return at most `max_chars` characters starting at byte offset `start`.
#[inline]
pub fn char_window_after(text: &str, start: usize, max_chars: usize) -> &str {
    let tail = &text[start..];
    match tail.char_indices().nth(max_chars) {
        Some((idx, _)) => &tail[..idx],
        None => tail,
    }
}

/// Truncate `text` to `limit` characters, replacing the last three with an
/// ellipsis when it is longer.
pub fn truncate_with_ellipsis(text: String, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text;
    }

    let keep = limit.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push(ELLIPSIS);
    out
}
