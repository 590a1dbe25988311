//! Scalar values stored under a key
//!
//! A value is either text or a number, but whether it *counts* as a number is
//! always decided from its text form. `Value::Text("3.5")` is numeric and is
//! written unquoted, exactly like `Value::Number(3.5)`.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Returned by numeric lookups when the section/key does not exist
pub const MISSING_NUMBER: f64 = f64::MAX;

/// Returned by numeric lookups when the stored value is not a number
pub const NOT_A_NUMBER: f64 = f64::MIN;

/// Whitespace accepted around a number
const NUMBER_WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\x0B', '\x0C'];

/// Value stored for a section/key pair
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Number(f64),
}

impl Value {
    /// Returns true if the text form of this value parses as a number
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Returns the numeric value, or [`NOT_A_NUMBER`] if the value is not numeric
    pub fn to_number(&self) -> f64 {
        self.as_number().unwrap_or(NOT_A_NUMBER)
    }

    /// Returns the numeric value if the text form parses as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Text(text) => parse_number(text),
            Value::Number(n) => parse_number(&n.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(f64::from(value))
    }
}

// Integers keep their exact digits; the text form is still classified as numeric
macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Text(value.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Parses `text` as a base-10 floating-point number
///
/// Accepts surrounding whitespace, a leading or trailing sign, a decimal point
/// and exponent notation. Thousands separators, currency symbols, hex and
/// digit separators are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_matches(NUMBER_WHITESPACE);
    if trimmed.is_empty() {
        return None;
    }

    let normalized = match trimmed.strip_suffix(['+', '-']) {
        Some(body) if !body.is_empty() && !body.starts_with(['+', '-']) => {
            let sign = &trimmed[body.len()..];
            Cow::Owned(format!("{}{}", sign, body))
        }
        Some(_) => return None,
        None => Cow::Borrowed(trimmed),
    };

    normalized.parse::<f64>().ok()
}

/// Returns true if `text` parses as a number, see [`parse_number`]
pub fn is_numeric(text: &str) -> bool {
    parse_number(text).is_some()
}
