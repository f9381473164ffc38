// HTML splitting
//
// Cuts markup into text runs and math script bodies with a single regex
// pass over tags. Comments, non-math scripts and style blocks produce no
// text. When the markup has a <body> tag, text before it is skipped; math
// scripts are collected from the whole document.

use super::Document;
use memchr::memchr;
use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<!--.*?-->|<script\b([^>]*)>(.*?)</script\s*>|<style\b[^>]*>.*?</style\s*>|<[^>]*>",
    )
    .expect("valid regex literal")
});

static MATH_SCRIPT_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:^|\s)type\s*=\s*["']?math/(?:tex|latex)"#).expect("valid regex literal")
});

static BODY_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<body(?:\s[^>]*)?>").expect("valid regex literal"));

pub(super) fn split(markup: &str) -> Document {
    let mut doc = Document::new();
    let text_start = BODY_OPEN.find(markup).map_or(0, |body| body.end());
    let mut last = 0;

    for caps in MARKUP.captures_iter(markup) {
        let Some(tag) = caps.get(0) else {
            continue;
        };
        if tag.start() > text_start {
            push_text(&mut doc, &markup[last.max(text_start)..tag.start()]);
        }
        last = tag.end();

        if let (Some(attrs), Some(body)) = (caps.get(1), caps.get(2))
            && MATH_SCRIPT_TYPE.is_match(attrs.as_str())
        {
            doc.push_math_script(body.as_str());
        }
    }
    push_text(&mut doc, &markup[last.max(text_start)..]);

    doc
}

fn push_text(doc: &mut Document, raw: &str) {
    if raw.trim().is_empty() {
        return;
    }
    doc.push_chunk(decode_entities(raw));
}

/// Decode the character references that commonly appear in text nodes.
///
/// Unknown or malformed references are left untouched.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = memchr(b'&', rest.as_bytes()) {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let Some(semi) = rest[1..].find(';').map(|i| i + 1).filter(|&i| i <= 10) else {
            out.push('&');
            rest = &rest[1..];
            continue;
        };

        match decode_reference(&rest[1..semi]) {
            Some(ch) => out.push(ch),
            None => out.push_str(&rest[..=semi]),
        }
        rest = &rest[semi + 1..];
    }
    out.push_str(rest);

    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        _ => {
            let numeric = name.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        },
    }
}
