//! Fluent test assertions for HTTP responses, cookies and JSON payloads.
//!
//! Responses are captured as [`Response`] snapshots (directly or from an
//! [`http::Response`]) and checked through chained assertions that panic
//! with a descriptive message on the first failed expectation.
//!
//! # Example
//!
//! ```rust
//! use rest_assert::{assert_json_that, assert_that, Response};
//!
//! let http_response = http::Response::builder()
//!     .status(200)
//!     .header("Content-Type", "application/json; charset=utf-8")
//!     .header("Set-Cookie", "session=abc; Path=/; Secure; HttpOnly")
//!     .body(r#"{"user": {"id": 7, "roles": ["admin"]}, "updatedAt": "2024-05-01"}"#)
//!     .unwrap();
//! let response = Response::from_http(&http_response);
//!
//! assert_that(&response)
//!     .is_ok()
//!     .is_json_utf8()
//!     .cookie("session")
//!     .is_secure()
//!     .is_http_only();
//!
//! assert_json_that(&response)
//!     .contains_path_with_value("user.id", 7)
//!     .is_array_with_size_at("user.roles", 1)
//!     .is_equal_to_ignoring_fields(r#"{"user": {"id": 7, "roles": ["admin"]}}"#, &["updatedAt"]);
//! ```

// ===== Materialized HTTP data =====
pub mod content_type;
pub mod cookie;
pub mod response;

// ===== JSON comparison and selection =====
pub mod json;

// ===== Fluent assertions =====
pub mod assert;

mod error;

pub use assert::{CookieAssert, JsonAssert, NumericBound, ResponseAssert};
pub use cookie::Cookie;
pub use error::{AssertionError, CookieError, JsonError, ResponseError};
pub use json::{entry, JsonEntry};
pub use response::Response;

use assert::fail;
use serde_json::Value;

/// Start assertions over a response.
pub fn assert_that(response: &Response) -> ResponseAssert<'_> {
    ResponseAssert::new(response)
}

/// Start assertions over a cookie.
pub fn assert_cookie(cookie: &Cookie) -> CookieAssert<'_> {
    CookieAssert::new(cookie)
}

/// Start assertions over the named cookie of a response.
///
/// # Panics
///
/// When the response sets no cookie with that name.
#[track_caller]
pub fn assert_cookie_that<'a>(name: &str, response: &'a Response) -> CookieAssert<'a> {
    match extract_cookie(name, response) {
        Some(cookie) => CookieAssert::new(cookie),
        None => fail(AssertionError::new(format!(
            "Expected cookie {name} to be defined"
        ))),
    }
}

/// Start assertions over a JSON string.
///
/// # Panics
///
/// When `json` is not valid JSON.
#[track_caller]
pub fn assert_json(json: &str) -> JsonAssert {
    JsonAssert::new(json)
}

/// Start assertions over a parsed JSON document.
pub fn assert_json_value(json: Value) -> JsonAssert {
    JsonAssert::from_value(json)
}

/// Start assertions over the JSON body of a response.
#[track_caller]
pub fn assert_json_that(response: &Response) -> JsonAssert {
    ResponseAssert::new(response).json()
}

/// Find a cookie by name, ignoring case.
pub fn extract_cookie<'a>(name: &str, response: &'a Response) -> Option<&'a Cookie> {
    response.cookie(name)
}

/// The response body as a JSON string.
pub fn extract_json(response: &Response) -> Result<String, ResponseError> {
    response.text().map(|body| body.trim().to_string())
}
