//! Structural comparison of JSON documents.
//!
//! The comparator walks both documents at once and reports every difference
//! as a human-readable message keyed by the dotted path of the node:
//! `user.address.city`, `items[2]`, or `[0].name` for items of a root array.

use crate::error::JsonError;
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use tracing::debug;

/// Key used when two scalar documents differ at the root.
const ROOT_KEY: &str = "json";

/// Category of a [`Difference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceKind {
    /// A key of the expected document is absent.
    Missing,
    /// A key of the actual document is not expected.
    Unexpected,
    /// Two scalars differ.
    Mismatch,
    /// Two nodes have different JSON types.
    Type,
    /// Two arrays have different lengths.
    Size,
    /// Exactly one side is null.
    Null,
}

/// A single difference between two documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    pub kind: DifferenceKind,
    /// Dotted path of the node, `None` for the root array or object.
    pub key: Option<String>,
    pub message: String,
}

/// Returns true when `json` parses as any JSON value, scalars included.
pub fn is_valid(json: &str) -> bool {
    serde_json::from_str::<Value>(json).is_ok()
}

/// Cheap shape check: the document starts with `[`.
pub fn is_array(json: &str) -> bool {
    json.trim_start().starts_with('[')
}

/// Cheap shape check: the document starts with `{`.
pub fn is_object(json: &str) -> bool {
    json.trim_start().starts_with('{')
}

/// Compare two JSON strings.
///
/// Returns an empty list when the documents are structurally equal.
pub fn compare_json(actual: &str, expected: &str) -> Result<Vec<String>, JsonError> {
    compare_json_ignoring::<&str>(actual, expected, &[])
}

/// Compare two JSON strings, skipping the given dotted paths.
pub fn compare_json_ignoring<S: AsRef<str>>(
    actual: &str,
    expected: &str,
    ignoring: &[S],
) -> Result<Vec<String>, JsonError> {
    let actual: Value = serde_json::from_str(actual)?;
    let expected: Value = serde_json::from_str(expected)?;
    Ok(compare_values(&actual, &expected, ignoring))
}

/// Compare two parsed documents, skipping the given dotted paths.
///
/// A path is skipped only when it matches an ignored entry exactly, so
/// ignoring `user` skips the whole `user` object while ignoring `user.id`
/// skips that single field.
pub fn compare_values<S: AsRef<str>>(
    actual: &Value,
    expected: &Value,
    ignoring: &[S],
) -> Vec<String> {
    compare_values_detailed(actual, expected, ignoring)
        .into_iter()
        .map(|difference| difference.message)
        .collect()
}

/// Same walk as [`compare_values`], keeping the kind and key of each
/// difference next to its message.
pub fn compare_values_detailed<S: AsRef<str>>(
    actual: &Value,
    expected: &Value,
    ignoring: &[S],
) -> Vec<Difference> {
    let mut comparator = Comparator {
        ignoring,
        differences: Vec::new(),
    };

    match (actual, expected) {
        (Value::Object(a), Value::Object(e)) => comparator.compare_objects("", a, e),
        (Value::Array(a), Value::Array(e)) => comparator.compare_arrays("", a, e),
        (Value::Array(_), Value::Object(_)) | (Value::Object(_), Value::Array(_)) => {
            comparator.report(
                DifferenceKind::Type,
                "",
                format!(
                    "Expected json to be {} but was {}",
                    kind_name(expected),
                    kind_name(actual)
                ),
            );
        }
        _ => comparator.compare_nodes(ROOT_KEY, actual, expected),
    }

    if !comparator.differences.is_empty() {
        debug!(
            count = comparator.differences.len(),
            "JSON documents are not equal"
        );
    }
    comparator.differences
}

struct Comparator<'i, S> {
    ignoring: &'i [S],
    differences: Vec<Difference>,
}

impl<S: AsRef<str>> Comparator<'_, S> {
    fn is_ignored(&self, key: &str) -> bool {
        self.ignoring.iter().any(|ignored| ignored.as_ref() == key)
    }

    fn report(&mut self, kind: DifferenceKind, key: &str, message: String) {
        self.differences.push(Difference {
            kind,
            key: (!key.is_empty()).then(|| key.to_string()),
            message,
        });
    }

    fn compare_objects(&mut self, key: &str, actual: &Map<String, Value>, expected: &Map<String, Value>) {
        for (name, actual_value) in actual {
            let child = child_key(key, name);
            if self.is_ignored(&child) {
                continue;
            }
            match expected.get(name) {
                Some(expected_value) => self.compare_nodes(&child, actual_value, expected_value),
                None => {
                    let message = format!("Key {child} was found but not expected");
                    self.report(DifferenceKind::Unexpected, &child, message);
                }
            }
        }

        for name in expected.keys() {
            let child = child_key(key, name);
            if !actual.contains_key(name) && !self.is_ignored(&child) {
                let message = format!("Expected json to contain {child}");
                self.report(DifferenceKind::Missing, &child, message);
            }
        }
    }

    fn compare_arrays(&mut self, key: &str, actual: &[Value], expected: &[Value]) {
        if actual.len() != expected.len() {
            let message = if key.is_empty() {
                format!(
                    "Expected size of array to be {} but was {}",
                    expected.len(),
                    actual.len()
                )
            } else {
                format!(
                    "Expected size of array {key} to be {} but was {}",
                    expected.len(),
                    actual.len()
                )
            };
            self.report(DifferenceKind::Size, key, message);
            return;
        }

        for (index, (actual_item, expected_item)) in actual.iter().zip(expected).enumerate() {
            let item = format!("{key}[{index}]");
            if !self.is_ignored(&item) {
                self.compare_nodes(&item, actual_item, expected_item);
            }
        }
    }

    fn compare_nodes(&mut self, key: &str, actual: &Value, expected: &Value) {
        let (kind, message) = match (actual, expected) {
            (Value::Null, Value::Null) => return,
            (Value::Null, _) => (
                DifferenceKind::Null,
                format!("Key {key} was null but expected value was {}", render(expected)),
            ),
            (_, Value::Null) => (
                DifferenceKind::Null,
                format!(
                    "Key {key} was expected to be null but found value was {}",
                    render(actual)
                ),
            ),
            (Value::Object(a), Value::Object(e)) => return self.compare_objects(key, a, e),
            (Value::Array(a), Value::Array(e)) => return self.compare_arrays(key, a, e),
            _ if kind_name(actual) != kind_name(expected) => (
                DifferenceKind::Type,
                format!(
                    "Expected type {} but was {} for key {key}",
                    kind_name(expected),
                    kind_name(actual)
                ),
            ),
            _ if values_equal(actual, expected) => return,
            _ => (
                DifferenceKind::Mismatch,
                format!(
                    "Expected {key} to be {} but was {}",
                    render(expected),
                    render(actual)
                ),
            ),
        };
        self.report(kind, key, message);
    }
}

fn child_key(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Name of the JSON kind of a value, as used in difference messages.
fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "Object",
        Value::Array(_) => "Array",
        Value::String(_) => "String",
        Value::Number(_) => "Number",
        Value::Bool(_) => "Boolean",
        Value::Null => "Null",
    }
}

/// Render a value for a message: strings unquoted, everything else as
/// compact JSON.
pub(crate) fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Deep equality where numbers compare by numeric value, so `1` equals
/// `1.0` at any depth.
pub(crate) fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(e)) => compare_numbers(a, e) == Some(Ordering::Equal),
        (Value::Array(a), Value::Array(e)) => {
            a.len() == e.len() && a.iter().zip(e).all(|(a, e)| values_equal(a, e))
        }
        (Value::Object(a), Value::Object(e)) => {
            a.len() == e.len()
                && a.iter()
                    .all(|(name, a)| e.get(name).is_some_and(|e| values_equal(a, e)))
        }
        _ => actual == expected,
    }
}

/// Order two numbers. Integers compare exactly; floats go through `f64`.
pub(crate) fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    if a.is_f64() || b.is_f64() {
        return a.as_f64()?.partial_cmp(&b.as_f64()?);
    }
    // Integers that do not fit an i64 are u64 values above i64::MAX.
    match (a.as_i64(), b.as_i64()) {
        (Some(a), Some(b)) => Some(a.cmp(&b)),
        (Some(_), None) => Some(Ordering::Less),
        (None, Some(_)) => Some(Ordering::Greater),
        (None, None) => Some(a.as_u64()?.cmp(&b.as_u64()?)),
    }
}
