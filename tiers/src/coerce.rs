//! Scalar inference for raw string input.
//!
//! Environment variables and command-line arguments arrive as strings. This
//! module turns them into typed [`Value`]s using a fixed priority:
//!
//! 1. Boolean keywords, case-insensitive: `true`, `yes`, `1` and
//!    `false`, `no`, `0`
//! 2. Integers (`i64`, optional sign, no surrounding whitespace)
//! 3. Floats, only when the string contains a `.`
//! 4. Anything else stays a string
//!
//! `"1"` and `"0"` are booleans, not integers.

use crate::tree::Value;

const TRUE_WORDS: [&str; 3] = ["true", "yes", "1"];
const FALSE_WORDS: [&str; 3] = ["false", "no", "0"];

/// Infer a typed value from a raw string. Never fails.
///
/// # Examples
///
/// ```
/// use tiers::{coerce, Value};
///
/// assert_eq!(coerce("true"), Value::Bool(true));
/// assert_eq!(coerce("0"), Value::Bool(false));
/// assert_eq!(coerce("3"), Value::Int(3));
/// assert_eq!(coerce("3.5"), Value::Float(3.5));
/// assert_eq!(coerce("hello"), Value::from("hello"));
/// ```
#[must_use]
pub fn coerce(raw: &str) -> Value {
    if let Some(b) = parse_bool_word(raw) {
        return Value::Bool(b);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    if raw.contains('.') {
        if let Ok(f) = raw.parse::<f64>() {
            return Value::Float(f);
        }
    }
    Value::String(raw.to_string())
}

/// Match the boolean keywords used by [`coerce`].
#[must_use]
pub fn parse_bool_word(raw: &str) -> Option<bool> {
    let lower = raw.to_lowercase();
    if TRUE_WORDS.contains(&lower.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}
