//! Text <-> value helpers shared by the RDF and XML codecs.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value};

/// `^-?(0|[1-9][0-9]*)(\.[0-9]+)?$`
static CANONICAL_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?$").expect("invalid number regex")
});

/// Upper-case the first character: `strokeWidth` → `StrokeWidth`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character: `StrokeWidth` → `strokeWidth`.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parse the leading integer of `s`, ignoring anything after it
/// (`"120.7px"` → `120`). Returns `None` when `s` has no leading digits.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Format a coordinate or size without a trailing `.0` for whole numbers.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Turn a numeric lexical form into a JSON number, integer when possible.
pub fn number_value(lexical: &str) -> Option<Value> {
    let lexical = lexical.trim();
    if let Ok(i) = lexical.parse::<i64>() {
        return Some(Value::Number(i.into()));
    }
    lexical
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// Read element text back into the most specific JSON scalar it denotes.
///
/// Canonical decimals become numbers, `true`/`false` become booleans, and
/// everything else stays a string (so `"007"` is not mangled into `7`).
pub fn infer_scalar(text: &str) -> Value {
    if CANONICAL_NUMBER_RE.is_match(text) {
        if let Some(n) = number_value(text) {
            return n;
        }
    }
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(text.to_string()),
    }
}

/// The text form of a scalar value. `None` for null, arrays, and objects.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
