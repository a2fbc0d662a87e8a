//! Error types for loading test data and reporting failed assertions.

use std::path::PathBuf;

/// Errors raised while parsing a `Set-Cookie` header value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CookieError {
    #[error("Set-Cookie value <{0}> has no name=value pair")]
    MissingPair(String),
    #[error("Set-Cookie value <{0}> has an empty cookie name")]
    EmptyName(String),
}

/// Errors raised while reading the body of a response.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("Response has no body")]
    MissingBody,
    #[error("Response body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("Response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading, parsing or querying JSON documents.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unable to serialize value to JSON: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Unable to get content of file <{}>: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to read content of url <{0}>")]
    Url(String),
    #[error("Invalid JSON path <{path}>: {reason}")]
    Path { path: String, reason: String },
}

/// A failed expectation.
///
/// Assertion objects panic with this message; internal checks return it so
/// composite assertions can collect several failures before reporting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AssertionError {
    message: String,
}

impl AssertionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
