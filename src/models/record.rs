use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text the API and the formatters use for "no value".
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// RawRecord — Unprocessed API document for one app
// ---------------------------------------------------------------------------

/// The JSON document returned by the API for one app, kept as-is.
///
/// Field names and presence vary with the release status of the game, so
/// nothing is assumed about its shape. Lookups on a non-object document
/// simply find nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Value);

impl RawRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// A record with no fields at all.
    pub fn empty() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }

    /// Top-level field lookup.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Walk a chain of object keys, e.g. `["estimateDetails", "revenue"]`.
    pub fn nested(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.0, |value, key| value.get(*key))
    }

    /// The most recent entry of the `history` array, if there is one.
    pub fn latest_history(&self) -> Option<&Value> {
        self.0.get("history")?.as_array()?.last()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// False for bodies that carry nothing: `null`, `false`, `0`, `""`.
    pub fn has_data(&self) -> bool {
        Scalar::from(&self.0).is_truthy()
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Default for RawRecord {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

// ---------------------------------------------------------------------------
// Scalar — A loosely-typed value taken from a RawRecord
// ---------------------------------------------------------------------------

/// A single value lifted out of a [`RawRecord`] without type checks.
///
/// The API is not consistent about sending numbers as numbers, so values are
/// carried through extraction untouched and only coerced when a number is
/// actually needed, using the same rules as JavaScript's `Number()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scalar(Value);

impl Scalar {
    pub fn null() -> Self {
        Self(Value::Null)
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Numeric view of the value.
    ///
    /// `null` is 0, booleans are 0 or 1, numeric strings are parsed (blank
    /// strings are 0, `0x`/`0o`/`0b` prefixes are honored) and anything else
    /// is NaN.
    pub fn to_number(&self) -> f64 {
        match &self.0 {
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => parse_number(s),
            Value::Array(_) | Value::Object(_) => f64::NAN,
        }
    }

    /// JavaScript truthiness: false for null, `false`, 0, NaN and `""`.
    pub fn is_truthy(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Whether this is the literal `"N/A"` placeholder.
    pub fn is_not_available(&self) -> bool {
        self.0.as_str() == Some(NOT_AVAILABLE)
    }
}

fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(n) = parse_radix(trimmed) {
        return n;
    }
    let numeric_chars = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !numeric_chars {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Unsigned `0x1A`, `0o17` or `0b101` literals; signs are not allowed.
fn parse_radix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(f64::NAN);
    }
    Some(
        digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d)),
    )
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<Value> for Scalar {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&Value> for Scalar {
    fn from(value: &Value) -> Self {
        Self(value.clone())
    }
}

impl From<&Scalar> for Scalar {
    fn from(value: &Scalar) -> Self {
        value.clone()
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self(Value::from(value))
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self(Value::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Self(Value::from(value))
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self(Value::from(value))
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self(Value::from(value))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self(Value::from(value))
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self(Value::from(value))
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_else(Scalar::null)
    }
}
