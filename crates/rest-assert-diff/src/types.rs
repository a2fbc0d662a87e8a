//! Core types for the diff library.

use rest_assert::json::{Difference, DifferenceKind};
use serde::{Deserialize, Serialize};

/// Category of a difference between two documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
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

impl DiffKind {
    /// Get the label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            DiffKind::Missing => "missing",
            DiffKind::Unexpected => "unexpected",
            DiffKind::Mismatch => "mismatch",
            DiffKind::Type => "type",
            DiffKind::Size => "size",
            DiffKind::Null => "null",
        }
    }
}

impl From<DifferenceKind> for DiffKind {
    fn from(kind: DifferenceKind) -> Self {
        match kind {
            DifferenceKind::Missing => DiffKind::Missing,
            DifferenceKind::Unexpected => DiffKind::Unexpected,
            DifferenceKind::Mismatch => DiffKind::Mismatch,
            DifferenceKind::Type => DiffKind::Type,
            DifferenceKind::Size => DiffKind::Size,
            DifferenceKind::Null => DiffKind::Null,
        }
    }
}

/// A single difference found by the comparator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffIssue {
    pub kind: DiffKind,
    /// Message as produced by the comparator.
    pub message: String,
    /// Dotted path of the node (e.g., "lines[1].quantity"), absent for root
    /// array or object differences.
    pub path: Option<String>,
}

impl From<Difference> for DiffIssue {
    fn from(difference: Difference) -> Self {
        Self {
            kind: difference.kind.into(),
            message: difference.message,
            path: difference.key,
        }
    }
}

/// Result of comparing two documents.
#[derive(Debug, Default, Serialize)]
pub struct DiffReport {
    /// Name of the actual document (file path or label).
    pub actual: String,
    /// Name of the expected document.
    pub expected: String,
    /// All differences found, in comparator order.
    pub issues: Vec<DiffIssue>,
    /// Paths that were skipped.
    pub ignored: Vec<String>,
}

impl DiffReport {
    /// Create an empty report for the two named documents.
    pub fn new(actual: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            actual: actual.into(),
            expected: expected.into(),
            ..Default::default()
        }
    }

    /// Add a comparator difference to the report.
    pub fn add(&mut self, difference: Difference) {
        self.issues.push(difference.into());
    }

    /// Check if the documents are equal.
    pub fn is_equal(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of differences.
    pub fn count(&self) -> usize {
        self.issues.len()
    }

    /// Number of differences of the given kind.
    pub fn count_kind(&self, kind: DiffKind) -> usize {
        self.issues.iter().filter(|issue| issue.kind == kind).count()
    }
}

/// Options for comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiffOptions {
    /// Dotted paths to skip, matched exactly (e.g., "id", "meta.createdAt").
    #[serde(default)]
    pub ignore: Vec<String>,
}
