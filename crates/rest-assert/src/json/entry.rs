use super::compare::render;
use serde_json::Value;
use std::fmt;

/// An expected value at a JSON path.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonEntry {
    key: String,
    value: Value,
}

impl JsonEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for JsonEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, render(&self.value))
    }
}

/// Shorthand for [`JsonEntry::new`].
pub fn entry(key: impl Into<String>, value: impl Into<Value>) -> JsonEntry {
    JsonEntry::new(key, value)
}
