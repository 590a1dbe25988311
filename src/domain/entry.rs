//! A single section/key/value record

use std::fmt;

use serde::Serialize;

use super::value::Value;

/// One `key=value` line together with the section it belongs to
///
/// Section and key are trimmed on construction and cannot be changed
/// afterwards, so an entry never carries surrounding whitespace in its names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    section: String,
    key: String,
    value: Value,
}

impl Entry {
    /// Creates a new entry, trimming section and key
    pub fn new(section: &str, key: &str, value: impl Into<Value>) -> Self {
        Self {
            section: section.trim().to_string(),
            key: key.trim().to_string(),
            value: value.into(),
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replaces the value, keeping section and key
    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    /// Returns true if the value is numeric
    pub fn is_number(&self) -> bool {
        self.value.is_number()
    }

    /// Returns the numeric value, or [`super::NOT_A_NUMBER`] if not numeric
    pub fn to_number(&self) -> f64 {
        self.value.to_number()
    }

    /// Exact, case-sensitive match on section and key
    pub fn matches(&self, section: &str, key: &str) -> bool {
        self.section == section && self.key == key
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}={}", self.section, self.key, self.value)
    }
}
