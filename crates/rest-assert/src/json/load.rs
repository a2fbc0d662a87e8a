//! Sources of expected JSON documents.

use crate::error::JsonError;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use url::Url;

/// Parse a JSON string.
pub fn parse(json: &str) -> Result<Value, JsonError> {
    Ok(serde_json::from_str(json.trim())?)
}

/// Read and parse a JSON file.
pub fn read_file(path: impl AsRef<Path>) -> Result<Value, JsonError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| JsonError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content)
}

/// Read and parse the JSON document behind a `file://` URL.
pub fn read_url(url: &Url) -> Result<Value, JsonError> {
    if url.scheme() != "file" {
        return Err(JsonError::Url(url.to_string()));
    }
    let path = url
        .to_file_path()
        .map_err(|_| JsonError::Url(url.to_string()))?;
    read_file(path)
}

/// Convert any serializable value into its JSON form.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value, JsonError> {
    serde_json::to_value(value).map_err(JsonError::Serialize)
}
