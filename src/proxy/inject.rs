// HTML rewriting for proxied pages
//
// A page fetched through a proxy loses its origin, so relative links are
// re-anchored with a <base> element. Framing restrictions carried in the
// markup are stripped.

use crate::common::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static HEAD_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<head(?:\s[^>]*)?>").expect("valid regex literal"));

static CSP_META: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv=["']?content-security-policy["']?[^>]*>"#)
        .expect("valid regex literal")
});

static FRAME_ANCESTORS_META: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]+content=["'][^"']*frame-ancestors[^"']*["'][^>]*>"#)
        .expect("valid regex literal")
});

static CROSSORIGIN_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i) crossorigin=['"][^'"]*['"]"#).expect("valid regex literal"));

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Escape text for HTML element content.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Anchor `html` at `url` and strip framing restrictions.
///
/// The `<base>` element goes right after the first `<head ...>` tag, or into
/// a new head prepended to the document when there is none.
pub fn inject_helpers(html: &str, url: &str) -> Result<String> {
    if html.is_empty() {
        return Err(Error::EmptyResponse);
    }

    let base = format!(r#"<base href="{}">"#, escape_attribute(url));
    let content = match HEAD_OPEN.find(html) {
        Some(head) => {
            let mut out = String::with_capacity(html.len() + base.len() + 1);
            out.push_str(&html[..head.end()]);
            out.push('\n');
            out.push_str(&base);
            out.push_str(&html[head.end()..]);
            out
        },
        None => format!("<head>{}</head>{}", base, html),
    };

    let content = CSP_META.replace_all(&content, "");
    let content = FRAME_ANCESTORS_META.replace_all(&content, "");
    Ok(CROSSORIGIN_ATTR.replace_all(&content, "").into_owned())
}

/// Minimal page shown in place of a document that could not be loaded.
pub fn render_error_page(url: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8" />
    <style>
      body {{ font-family: system-ui, sans-serif; margin: 0; padding: 32px; color: #222; background: #fafafa; }}
      h1 {{ font-size: 18px; margin-bottom: 12px; }}
      code {{ padding: 2px 4px; background: rgba(0,0,0,0.06); border-radius: 4px; }}
    </style>
  </head>
  <body>
    <h1>Page could not be loaded</h1>
    <p><strong>URL:</strong> <code>{}</code></p>
    <p><strong>Reason:</strong> {}</p>
  </body>
</html>"#,
        escape_html(url),
        escape_html(message)
    )
}
