use super::{ensure, fail};
use crate::error::{AssertionError, JsonError};
use crate::json::{self, compare_numbers, load, render, values_equal, JsonEntry};
use serde::Serialize;
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use url::Url;

/// Number an ordering assertion compares against.
///
/// Integers keep their exact value; floats are compared as `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericBound {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

macro_rules! numeric_bound_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for NumericBound {
                fn from(value: $source) -> Self {
                    NumericBound::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

numeric_bound_from!(Integer as i64: i8, i16, i32, i64);
numeric_bound_from!(Unsigned as u64: u8, u16, u32, u64);
numeric_bound_from!(Float as f64: f32, f64);

impl NumericBound {
    /// `None` for NaN and infinite floats.
    fn to_number(self) -> Option<Number> {
        match self {
            NumericBound::Integer(value) => Some(value.into()),
            NumericBound::Unsigned(value) => Some(value.into()),
            NumericBound::Float(value) => Number::from_f64(value),
        }
    }
}

impl fmt::Display for NumericBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericBound::Integer(value) => write!(f, "{value}"),
            NumericBound::Unsigned(value) => write!(f, "{value}"),
            NumericBound::Float(value) => write!(f, "{value}"),
        }
    }
}

/// Assertions over a JSON document.
///
/// Path arguments accept full JSONPath expressions (`$.items[*].id`) as well
/// as the member shorthand (`items[0].id`).
#[derive(Debug, Clone)]
pub struct JsonAssert {
    json: Value,
}

impl JsonAssert {
    /// Parse `json`, panicking when it is not valid JSON.
    #[track_caller]
    pub fn new(json: &str) -> Self {
        match load::parse(json) {
            Ok(json) => Self { json },
            Err(_) => fail(AssertionError::new("Expected json to be valid")),
        }
    }

    pub fn from_value(json: Value) -> Self {
        Self { json }
    }

    /// The document under test.
    pub fn value(&self) -> &Value {
        &self.json
    }

    // Root shape

    #[track_caller]
    pub fn is_array(&self) -> &Self {
        ensure(self.json.is_array(), || {
            "Expected json to be an array".to_string()
        });
        self
    }

    #[track_caller]
    pub fn is_object(&self) -> &Self {
        ensure(self.json.is_object(), || {
            "Expected json to be an object".to_string()
        });
        self
    }

    #[track_caller]
    pub fn is_array_with_size(&self, size: usize) -> &Self {
        self.is_array();
        let actual = self.json.as_array().map_or(0, Vec::len);
        ensure(actual == size, || {
            format!("Expected json to be an array with size {size} but was {actual}")
        });
        self
    }

    #[track_caller]
    pub fn is_empty_array(&self) -> &Self {
        self.is_array_with_size(0)
    }

    // Paths

    #[track_caller]
    pub fn contains_path(&self, path: &str) -> &Self {
        self.node(path);
        self
    }

    #[track_caller]
    pub fn does_not_contain_path(&self, path: &str) -> &Self {
        ensure(self.select(path).is_none(), || {
            format!("Expected {path} not to be found")
        });
        self
    }

    #[track_caller]
    pub fn does_not_contain_path_or_is_null(&self, path: &str) -> &Self {
        match self.select(path) {
            None | Some(Value::Null) => self,
            Some(value) => fail(AssertionError::new(format!(
                "Expected {path} not to be found or to be null but was {}",
                render(&value)
            ))),
        }
    }

    /// All missing paths are reported together.
    #[track_caller]
    pub fn contains_paths(&self, paths: &[&str]) -> &Self {
        let missing: Vec<&str> = paths
            .iter()
            .copied()
            .filter(|path| self.select(path).is_none())
            .collect();
        ensure(missing.is_empty(), || {
            format!("Expected {} to be found", missing.join(", "))
        });
        self
    }

    /// Numbers compare by numeric value, so `1` matches `1.0`.
    #[track_caller]
    pub fn contains_path_with_value(&self, path: &str, value: impl Into<Value>) -> &Self {
        let expected = value.into();
        let actual = self.node(path);
        ensure(values_equal(&actual, &expected), || {
            format!(
                "Expected {path} to be {} but was {}",
                render(&expected),
                render(&actual)
            )
        });
        self
    }

    #[track_caller]
    pub fn contains_entry(&self, entry: &JsonEntry) -> &Self {
        self.contains_entries(std::slice::from_ref(entry))
    }

    /// Every failing entry is reported in a single message.
    #[track_caller]
    pub fn contains_entries(&self, entries: &[JsonEntry]) -> &Self {
        let failing: Vec<&JsonEntry> = entries
            .iter()
            .filter(|entry| {
                !self
                    .select(entry.key())
                    .is_some_and(|actual| values_equal(&actual, entry.value()))
            })
            .collect();
        ensure(failing.is_empty(), || {
            let keys: Vec<&str> = failing.iter().map(|e| e.key()).collect();
            let values: Vec<String> = failing.iter().map(|e| render(e.value())).collect();
            format!(
                "Expected following {} to be {}",
                keys.join(", "),
                values.join(", ")
            )
        });
        self
    }

    #[track_caller]
    pub fn is_array_at(&self, path: &str) -> &Self {
        self.node_is(path, Value::is_array, "an array")
    }

    #[track_caller]
    pub fn is_object_at(&self, path: &str) -> &Self {
        self.node_is(path, Value::is_object, "an object")
    }

    #[track_caller]
    pub fn is_array_with_size_at(&self, path: &str, size: usize) -> &Self {
        let node = self.node(path);
        let Some(items) = node.as_array() else {
            fail(AssertionError::new(format!("Expected {path} to be an array")));
        };
        let actual = items.len();
        ensure(actual == size, || {
            format!("Expected {path} to be an array with size {size} but was {actual}")
        });
        self
    }

    #[track_caller]
    pub fn is_empty_array_at(&self, path: &str) -> &Self {
        self.is_array_with_size_at(path, 0)
    }

    #[track_caller]
    pub fn is_null(&self, path: &str) -> &Self {
        self.node_is(path, Value::is_null, "null")
    }

    #[track_caller]
    pub fn is_not_null(&self, path: &str) -> &Self {
        let node = self.node(path);
        ensure(!node.is_null(), || format!("Expected {path} not to be null"));
        self
    }

    #[track_caller]
    pub fn is_number(&self, path: &str) -> &Self {
        self.node_is(path, Value::is_number, "a number")
    }

    #[track_caller]
    pub fn is_string(&self, path: &str) -> &Self {
        self.node_is(path, Value::is_string, "a string")
    }

    #[track_caller]
    pub fn is_boolean(&self, path: &str) -> &Self {
        self.node_is(path, Value::is_boolean, "a boolean")
    }

    #[track_caller]
    pub fn is_empty_string(&self, path: &str) -> &Self {
        self.node_is(path, |v| v.as_str() == Some(""), "an empty string")
    }

    #[track_caller]
    pub fn is_not_empty_string(&self, path: &str) -> &Self {
        self.is_string(path);
        let node = self.node(path);
        ensure(node.as_str() != Some(""), || {
            format!("Expected {path} not to be an empty string")
        });
        self
    }

    #[track_caller]
    pub fn is_true(&self, path: &str) -> &Self {
        self.node_is(path, |v| v.as_bool() == Some(true), "true")
    }

    #[track_caller]
    pub fn is_false(&self, path: &str) -> &Self {
        self.node_is(path, |v| v.as_bool() == Some(false), "false")
    }

    #[track_caller]
    pub fn is_zero(&self, path: &str) -> &Self {
        self.compare_number(path, "zero", NumericBound::Integer(0), Ordering::is_eq)
    }

    #[track_caller]
    pub fn is_greater_than(&self, path: &str, value: impl Into<NumericBound>) -> &Self {
        let bound = value.into();
        self.compare_number(path, &format!("greater than {bound}"), bound, Ordering::is_gt)
    }

    #[track_caller]
    pub fn is_greater_than_or_equal_to(&self, path: &str, value: impl Into<NumericBound>) -> &Self {
        let bound = value.into();
        let what = format!("greater than or equal to {bound}");
        self.compare_number(path, &what, bound, Ordering::is_ge)
    }

    #[track_caller]
    pub fn is_less_than(&self, path: &str, value: impl Into<NumericBound>) -> &Self {
        let bound = value.into();
        self.compare_number(path, &format!("less than {bound}"), bound, Ordering::is_lt)
    }

    #[track_caller]
    pub fn is_less_than_or_equal_to(&self, path: &str, value: impl Into<NumericBound>) -> &Self {
        let bound = value.into();
        let what = format!("less than or equal to {bound}");
        self.compare_number(path, &what, bound, Ordering::is_le)
    }

    #[track_caller]
    pub fn is_positive(&self, path: &str) -> &Self {
        self.compare_number(path, "positive", NumericBound::Integer(0), Ordering::is_gt)
    }

    #[track_caller]
    pub fn is_negative(&self, path: &str) -> &Self {
        self.compare_number(path, "negative", NumericBound::Integer(0), Ordering::is_lt)
    }

    // Equality

    #[track_caller]
    pub fn is_strictly_equal_to(&self, expected: &str) -> &Self {
        self.is_equal_to_ignoring_fields(expected, &[])
    }

    #[track_caller]
    pub fn is_strictly_equal_to_value(&self, expected: &Value) -> &Self {
        self.is_equal_to_value_ignoring_fields(expected, &[])
    }

    #[track_caller]
    pub fn is_strictly_equal_to_file(&self, expected: impl AsRef<Path>) -> &Self {
        self.is_equal_to_file_ignoring_fields(expected, &[])
    }

    #[track_caller]
    pub fn is_strictly_equal_to_url(&self, expected: &Url) -> &Self {
        self.is_equal_to_url_ignoring_fields(expected, &[])
    }

    #[track_caller]
    pub fn is_strictly_equal_to_object<T: Serialize + ?Sized>(&self, expected: &T) -> &Self {
        self.is_equal_to_object_ignoring_fields(expected, &[])
    }

    /// Compare with `expected`, skipping the given dotted paths
    /// (`id`, `user.createdAt`, `items[0]`).
    #[track_caller]
    pub fn is_equal_to_ignoring_fields(&self, expected: &str, ignoring: &[&str]) -> &Self {
        let expected = loaded(load::parse(expected));
        self.is_equal_to_value_ignoring_fields(&expected, ignoring)
    }

    #[track_caller]
    pub fn is_equal_to_value_ignoring_fields(&self, expected: &Value, ignoring: &[&str]) -> &Self {
        let differences = json::compare_values(&self.json, expected, ignoring);
        ensure(differences.is_empty(), || differences.join(",\n"));
        self
    }

    #[track_caller]
    pub fn is_equal_to_file_ignoring_fields(
        &self,
        expected: impl AsRef<Path>,
        ignoring: &[&str],
    ) -> &Self {
        let expected = loaded(load::read_file(expected));
        self.is_equal_to_value_ignoring_fields(&expected, ignoring)
    }

    #[track_caller]
    pub fn is_equal_to_url_ignoring_fields(&self, expected: &Url, ignoring: &[&str]) -> &Self {
        let expected = loaded(load::read_url(expected));
        self.is_equal_to_value_ignoring_fields(&expected, ignoring)
    }

    #[track_caller]
    pub fn is_equal_to_object_ignoring_fields<T: Serialize + ?Sized>(
        &self,
        expected: &T,
        ignoring: &[&str],
    ) -> &Self {
        let expected = loaded(load::to_json(expected));
        self.is_equal_to_value_ignoring_fields(&expected, ignoring)
    }

    #[track_caller]
    fn select(&self, path: &str) -> Option<Value> {
        match json::select(&self.json, path) {
            Ok(selected) => selected,
            Err(e) => fail(AssertionError::new(e.to_string())),
        }
    }

    /// The selected node, panicking when the path matches nothing.
    #[track_caller]
    fn node(&self, path: &str) -> Value {
        match self.select(path) {
            Some(node) => node,
            None => fail(AssertionError::new(format!("Expected {path} to be found"))),
        }
    }

    #[track_caller]
    fn node_is(&self, path: &str, predicate: impl Fn(&Value) -> bool, what: &str) -> &Self {
        let node = self.node(path);
        ensure(predicate(&node), || format!("Expected {path} to be {what}"));
        self
    }

    #[track_caller]
    fn compare_number(
        &self,
        path: &str,
        what: &str,
        bound: NumericBound,
        accept: impl Fn(Ordering) -> bool,
    ) -> &Self {
        let node = self.node(path);
        let Value::Number(number) = &node else {
            fail(AssertionError::new(format!("Expected {path} to be a number")));
        };
        let ordering = bound
            .to_number()
            .and_then(|bound| compare_numbers(number, &bound));
        ensure(ordering.is_some_and(accept), || {
            format!("Expected {path} to be {what} but was {}", render(&node))
        });
        self
    }
}

/// Unwrap a loaded expected document, turning load errors into failures.
#[track_caller]
fn loaded(result: Result<Value, JsonError>) -> Value {
    match result {
        Ok(value) => value,
        Err(e) => fail(AssertionError::new(e.to_string())),
    }
}
