/// Escapes a raw value for use inside a single-quoted SQL literal.
///
/// Every `'` becomes `''` and every `\` becomes `\\`. The input is always
/// treated as raw text, so escaped output must never be fed back in.
pub fn escape_literal(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\'' => escaped.push_str("''"),
            '\\' => escaped.push_str("\\\\"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escapes `raw` and wraps it in single quotes.
pub fn quote_literal(raw: &str) -> String {
    format!("'{}'", escape_literal(raw))
}

/// Inverse of [`escape_literal`].
pub fn unescape_literal(escaped: &str) -> String {
    let mut raw = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' | '\\' if chars.peek() == Some(&c) => {
                chars.next();
                raw.push(c);
            }
            other => raw.push(other),
        }
    }
    raw
}
