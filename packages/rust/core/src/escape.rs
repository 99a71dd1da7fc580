//! Presentation escaping, applied once at the output boundary.

/// HTML-entity encode a title.
///
/// Every `&` is encoded, including one that already starts an entity, so
/// escaping twice is not idempotent. Callers escape exactly once.
pub fn escape_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape when requested, otherwise pass through.
pub fn maybe_escape(title: String, escape: bool) -> String {
    if escape { escape_title(&title) } else { title }
}
