//! Fluent assertions.
//!
//! Every assertion method checks one expectation, panics with a descriptive
//! message when it does not hold and otherwise returns the assertion object
//! so checks can be chained:
//!
//! ```rust
//! use rest_assert::{assert_that, Response};
//!
//! let response = Response::new(200, Some("application/json; charset=utf-8"))
//!     .with_body(r#"{"id": 1}"#);
//!
//! assert_that(&response).is_ok().is_json_utf8();
//! ```
//!
//! Panics are reported at the caller's location (`#[track_caller]`).

mod cookie;
mod json;
mod response;

pub use cookie::CookieAssert;
pub use json::{JsonAssert, NumericBound};
pub use response::ResponseAssert;

use crate::error::AssertionError;
use tracing::debug;

/// Panic with the failure message.
#[track_caller]
pub(crate) fn fail(error: AssertionError) -> ! {
    debug!(message = %error, "Assertion failed");
    panic!("{error}");
}

/// Fail with `message` unless `condition` holds.
#[track_caller]
pub(crate) fn ensure(condition: bool, message: impl FnOnce() -> String) {
    if !condition {
        fail(AssertionError::new(message()));
    }
}

/// Fail with the collected failures, joined one per line.
#[track_caller]
pub(crate) fn ensure_all(failures: Vec<AssertionError>) {
    if !failures.is_empty() {
        let message = failures
            .iter()
            .map(AssertionError::message)
            .collect::<Vec<_>>()
            .join(",\n");
        fail(AssertionError::new(message));
    }
}

/// Collects a check into `failures` instead of panicking.
pub(crate) fn check(
    failures: &mut Vec<AssertionError>,
    condition: bool,
    message: impl FnOnce() -> String,
) {
    if !condition {
        failures.push(AssertionError::new(message()));
    }
}
