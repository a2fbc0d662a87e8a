//! JSONPath selection over parsed documents.

use crate::error::JsonError;
use serde_json::Value;
use serde_json_path::JsonPath;
use tracing::trace;

/// Turn a shorthand path into a rooted JSONPath expression.
///
/// `$`-prefixed paths are kept, bracket paths get a `$` and anything else
/// is treated as a member path: `user.name` becomes `$.user.name`.
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('$') {
        path.to_string()
    } else if path.starts_with('[') {
        format!("${path}")
    } else {
        format!("$.{path}")
    }
}

/// Select the nodes matched by `path`.
///
/// Returns `None` when nothing matches, the node itself for a single match
/// and an array of the matched nodes otherwise.
pub fn select(json: &Value, path: &str) -> Result<Option<Value>, JsonError> {
    let normalized = normalize_path(path);
    let json_path = JsonPath::parse(&normalized).map_err(|e| JsonError::Path {
        path: normalized.clone(),
        reason: e.to_string(),
    })?;

    let nodes = json_path.query(json).all();
    trace!(path = %normalized, matches = nodes.len(), "Selected JSON nodes");

    Ok(match nodes.as_slice() {
        [] => None,
        [node] => Some((*node).clone()),
        many => Some(Value::Array(many.iter().map(|n| (*n).clone()).collect())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "store": {
                "name": "corner shop",
                "books": [
                    {"title": "Dune", "price": 8.99},
                    {"title": "Emma", "price": 12}
                ],
                "closed": null
            }
        })
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("$.a.b"), "$.a.b");
        assert_eq!(normalize_path("$"), "$");
        assert_eq!(normalize_path("[0].name"), "$[0].name");
        assert_eq!(normalize_path("a.b"), "$.a.b");
        assert_eq!(normalize_path("a[1]"), "$.a[1]");
    }

    #[test]
    fn test_select_single_node() {
        let json = document();
        assert_eq!(
            select(&json, "store.name").unwrap(),
            Some(json!("corner shop"))
        );
        assert_eq!(
            select(&json, "$.store.books[1].price").unwrap(),
            Some(json!(12))
        );
        assert_eq!(select(&json, "store.closed").unwrap(), Some(Value::Null));
    }

    #[test]
    fn test_select_many_nodes() {
        let json = document();
        assert_eq!(
            select(&json, "store.books[*].title").unwrap(),
            Some(json!(["Dune", "Emma"]))
        );
        assert_eq!(
            select(&json, "$..price").unwrap(),
            Some(json!([8.99, 12]))
        );
    }

    #[test]
    fn test_select_nothing() {
        let json = document();
        assert_eq!(select(&json, "store.owner").unwrap(), None);
        assert_eq!(select(&json, "store.books[5]").unwrap(), None);
    }

    #[test]
    fn test_select_root_array() {
        let json = json!([{"id": 1}, {"id": 2}]);
        assert_eq!(select(&json, "[1].id").unwrap(), Some(json!(2)));
    }

    #[test]
    fn test_invalid_path() {
        let err = select(&document(), "store[").unwrap_err();
        assert!(matches!(err, JsonError::Path { ref path, .. } if path == "$.store["));
    }
}
