//! Predicates for plain numeric tokens.
//!
//! These decide the Integer and Double branches of
//! [`classify_and_build`](crate::classify_and_build) and how the evaluator
//! reads numbers out of text cells.

fn split_sign(s: &str) -> &str {
    s.strip_prefix('+')
        .or_else(|| s.strip_prefix('-'))
        .unwrap_or(s)
}

/// `[+-]?digits`, at least one digit.
pub fn is_integer_token(s: &str) -> bool {
    let digits = split_sign(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `[+-]?` followed by digits with at most one `.`, at least one digit.
/// Every integer token is also a double token.
pub fn is_double_token(s: &str) -> bool {
    let body = split_sign(s);
    let mut dot = false;
    let mut digit = false;
    for b in body.bytes() {
        match b {
            b'0'..=b'9' => digit = true,
            b'.' if !dot => dot = true,
            _ => return false,
        }
    }
    digit
}

pub fn parse_integer(s: &str) -> Option<i64> {
    if !is_integer_token(s) {
        return None;
    }
    s.parse().ok()
}

/// Digit runs too long for `f64` overflow to infinity and are refused.
pub fn parse_double(s: &str) -> Option<f64> {
    if !is_double_token(s) {
        return None;
    }
    s.parse().ok().filter(|n: &f64| n.is_finite())
}
