//! Quoting rules for text cells in the file encoding.
//!
//! A text value is stored wrapped in `"`; inside the quotes a backslash
//! escapes the next character, so `\"` is a literal quote and `\\` a literal
//! backslash. Empty text is stored as an empty field.

pub const QUOTE: char = '"';
pub const ESCAPE: char = '\\';

/// Wrap `content` for storage.
pub fn quote_text(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(content.len() + 2);
    out.push(QUOTE);
    for ch in content.chars() {
        if ch == QUOTE || ch == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
    out.push(QUOTE);
    out
}

/// True when `token` is a text token: empty, or enclosed in quotes.
pub fn is_quoted(token: &str) -> bool {
    token.is_empty() || (token.len() >= 2 && token.starts_with(QUOTE) && token.ends_with(QUOTE))
}

/// Inverse of [`quote_text`]. Returns `None` for tokens that are not quoted.
pub fn unquote_text(token: &str) -> Option<String> {
    if !is_quoted(token) {
        return None;
    }
    if token.is_empty() {
        return Some(String::new());
    }
    let inner = &token[1..token.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            match chars.next() {
                Some(next) => out.push(next),
                // dangling escape before the closing quote
                None => out.push(ESCAPE),
            }
        } else {
            out.push(ch);
        }
    }
    Some(out)
}
