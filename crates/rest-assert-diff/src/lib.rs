//! Structural JSON diff library built on rest-assert.
//!
//! This library reports the differences between an actual and an expected
//! JSON document, using the same comparator as the rest-assert equality
//! assertions. It can be used as a standalone library or through the
//! `rest-assert-diff` CLI binary.
//!
//! # Example
//!
//! ```
//! use rest_assert_diff::{diff_str, DiffKind, DiffOptions};
//!
//! let options = DiffOptions {
//!     ignore: vec!["updatedAt".to_string()],
//! };
//! let report = diff_str(
//!     r#"{"id": 1, "updatedAt": "today"}"#,
//!     r#"{"id": 2, "updatedAt": "yesterday"}"#,
//!     &options,
//! )
//! .unwrap();
//!
//! assert_eq!(report.count(), 1);
//! assert_eq!(report.issues[0].kind, DiffKind::Mismatch);
//! ```

mod types;

pub mod config;

use rest_assert::json::{self, load};
use rest_assert::JsonError;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

// Re-export public types
pub use types::{DiffIssue, DiffKind, DiffOptions, DiffReport};

/// Compare two JSON strings.
pub fn diff_str(actual: &str, expected: &str, options: &DiffOptions) -> Result<DiffReport, JsonError> {
    let actual = load::parse(actual)?;
    let expected = load::parse(expected)?;
    Ok(diff_values("actual", "expected", &actual, &expected, options))
}

/// Compare two JSON files.
///
/// The report names the documents after their paths.
pub fn diff_files(actual: &Path, expected: &Path, options: &DiffOptions) -> Result<DiffReport, JsonError> {
    let actual_json = load::read_file(actual)?;
    let expected_json = load::read_file(expected)?;
    Ok(diff_values(
        actual.display().to_string(),
        expected.display().to_string(),
        &actual_json,
        &expected_json,
        options,
    ))
}

/// Compare two parsed documents, naming them in the report.
pub fn diff_values(
    actual_name: impl Into<String>,
    expected_name: impl Into<String>,
    actual: &Value,
    expected: &Value,
    options: &DiffOptions,
) -> DiffReport {
    let mut report = DiffReport::new(actual_name, expected_name);
    report.ignored = options.ignore.clone();

    for difference in json::compare_values_detailed(actual, expected, &options.ignore) {
        report.add(difference);
    }

    debug!(
        actual = %report.actual,
        expected = %report.expected,
        differences = report.count(),
        "Compared documents"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_diff_equal_documents() {
        let report = diff_str(
            r#"{"a": [1, 2], "b": {"c": null}}"#,
            r#"{"b": {"c": null}, "a": [1, 2]}"#,
            &DiffOptions::default(),
        )
        .unwrap();
        assert!(report.is_equal());
        assert_eq!(report.actual, "actual");
        assert_eq!(report.expected, "expected");
    }

    #[test]
    fn test_diff_reports_every_difference() {
        let report = diff_str(
            r#"{"id": "1", "tags": [1], "extra": true, "owner": null}"#,
            r#"{"id": 1, "tags": [1, 2], "missing": 0, "owner": "bob"}"#,
            &DiffOptions::default(),
        )
        .unwrap();

        let kinds: Vec<DiffKind> = report.issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiffKind::Unexpected,
                DiffKind::Type,
                DiffKind::Null,
                DiffKind::Size,
                DiffKind::Missing,
            ]
        );
    }

    #[test]
    fn test_diff_kinds_do_not_depend_on_message_text() {
        let report = diff_str(
            r#"{"json": "<b>", "Key x": "a was found but not expected"}"#,
            r#"{"json": "<a>", "Key x": "b"}"#,
            &DiffOptions::default(),
        )
        .unwrap();

        let issues: Vec<(DiffKind, Option<&str>)> = report
            .issues
            .iter()
            .map(|issue| (issue.kind, issue.path.as_deref()))
            .collect();
        assert_eq!(
            issues,
            vec![
                (DiffKind::Mismatch, Some("Key x")),
                (DiffKind::Mismatch, Some("json")),
            ]
        );
    }

    #[test]
    fn test_diff_ignores_paths() {
        let options = DiffOptions {
            ignore: vec!["id".to_string(), "meta.at".to_string()],
        };
        let report = diff_str(
            r#"{"id": 1, "meta": {"at": 1, "by": "a"}}"#,
            r#"{"id": 2, "meta": {"at": 2, "by": "a"}}"#,
            &options,
        )
        .unwrap();
        assert!(report.is_equal());
        assert_eq!(report.ignored, options.ignore);
    }

    #[test]
    fn test_diff_invalid_input() {
        let result = diff_str("{", "{}", &DiffOptions::default());
        assert!(matches!(result, Err(JsonError::Parse(_))));
    }

    #[test]
    fn test_diff_files() {
        let mut actual = NamedTempFile::new().unwrap();
        write!(actual, r#"[{{"name": "a"}}, {{"name": "b"}}]"#).unwrap();
        let mut expected = NamedTempFile::new().unwrap();
        write!(expected, r#"[{{"name": "a"}}, {{"name": "c"}}]"#).unwrap();

        let report = diff_files(actual.path(), expected.path(), &DiffOptions::default()).unwrap();
        assert_eq!(report.count(), 1);
        assert_eq!(report.issues[0].path.as_deref(), Some("[1].name"));
        assert_eq!(report.actual, actual.path().display().to_string());
    }

    #[test]
    fn test_diff_missing_file() {
        let expected = NamedTempFile::new().unwrap();
        let result = diff_files(
            Path::new("/no/such/actual.json"),
            expected.path(),
            &DiffOptions::default(),
        );
        assert!(matches!(result, Err(JsonError::Io { .. })));
    }
}
