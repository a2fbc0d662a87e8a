//! Cookie snapshot and `Set-Cookie` parsing.
//!
//! A [`Cookie`] is the materialized form of a cookie set by a response. It
//! can be built by hand for tests or parsed from a `Set-Cookie` header value.
//!
//! # Example
//!
//! ```rust
//! use rest_assert::Cookie;
//!
//! let cookie = Cookie::parse_set_cookie("session=abc123; Path=/api; Max-Age=3600; Secure; HttpOnly")
//!     .unwrap();
//!
//! assert_eq!(cookie.name(), "session");
//! assert_eq!(cookie.path(), "/api");
//! assert_eq!(cookie.max_age(), 3600);
//! assert!(cookie.is_secure());
//! assert!(cookie.is_http_only());
//! ```

use crate::error::CookieError;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

const DEFAULT_DOMAIN: &str = "localhost";
const DEFAULT_PATH: &str = "/";

/// Max-age of a session cookie (discarded when the client closes).
pub const SESSION_MAX_AGE: i64 = -1;

/// A cookie as set by a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: String,
    domain: String,
    path: String,
    /// Seconds until expiry: `-1` for session cookies, `0` for deletion.
    max_age: i64,
    expiry: Option<DateTime<Utc>>,
    secure: bool,
    http_only: bool,
}

impl Cookie {
    /// Create a session cookie for `localhost` on path `/`.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: DEFAULT_DOMAIN.to_string(),
            path: DEFAULT_PATH.to_string(),
            max_age: SESSION_MAX_AGE,
            expiry: None,
            secure: false,
            http_only: false,
        }
    }

    /// Set the Domain attribute.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set the Path attribute.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the max-age in seconds.
    ///
    /// A positive max-age also fixes the expiry date relative to now. The
    /// expiry stays unset when that date is out of range.
    #[must_use]
    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = seconds;
        self.expiry = (seconds > 0)
            .then(|| Duration::try_seconds(seconds))
            .flatten()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));
        self
    }

    /// Set the expiry date.
    ///
    /// No expiry makes this a session cookie; otherwise max-age becomes the
    /// number of whole seconds left before the expiry date.
    #[must_use]
    pub fn with_expiry(mut self, expiry: Option<DateTime<Utc>>) -> Self {
        self.max_age = match expiry {
            Some(at) => (at - Utc::now()).num_seconds().max(0),
            None => SESSION_MAX_AGE,
        };
        self.expiry = expiry;
        self
    }

    /// Set the Secure attribute.
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the `HttpOnly` attribute.
    #[must_use]
    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Parse a single `Set-Cookie` header value.
    ///
    /// Attribute names are case-insensitive and unknown attributes are
    /// ignored. `Max-Age` takes precedence over `Expires` (RFC 6265 §5.3).
    pub fn parse_set_cookie(header_value: &str) -> Result<Self, CookieError> {
        let mut parts = header_value.split(';');

        let pair = parts.next().unwrap_or_default().trim();
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| CookieError::MissingPair(header_value.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CookieError::EmptyName(header_value.to_string()));
        }
        let value = value.trim().trim_matches('"');

        let mut cookie = Cookie::new(name, value);
        let mut max_age: Option<i64> = None;
        let mut expires: Option<DateTime<Utc>> = None;

        for attribute in parts {
            let attribute = attribute.trim();
            let (key, attr_value) = match attribute.split_once('=') {
                Some((k, v)) => (k.trim(), v.trim()),
                None => (attribute, ""),
            };

            match key.to_ascii_lowercase().as_str() {
                "domain" if !attr_value.is_empty() => {
                    cookie.domain = attr_value.trim_start_matches('.').to_ascii_lowercase();
                }
                "path" if !attr_value.is_empty() => cookie.path = attr_value.to_string(),
                "max-age" => {
                    if let Ok(seconds) = attr_value.parse::<i64>() {
                        max_age = Some(seconds);
                    }
                }
                "expires" => expires = parse_http_date(attr_value),
                "secure" => cookie.secure = true,
                "httponly" => cookie.http_only = true,
                _ => {}
            }
        }

        Ok(match (max_age, expires) {
            (Some(seconds), _) => cookie.with_max_age(seconds.max(0)),
            (None, Some(at)) => cookie.with_expiry(Some(at)),
            (None, None) => cookie,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn max_age(&self) -> i64 {
        self.max_age
    }

    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        self.expiry
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn is_http_only(&self) -> bool {
        self.http_only
    }

    /// True when the cookie outlives the client session.
    pub fn is_persistent(&self) -> bool {
        self.max_age > 0
    }

    /// True for session cookies.
    pub fn is_session(&self) -> bool {
        self.max_age < 0
    }

    /// True when the response asks the client to delete the cookie.
    pub fn is_expired(&self) -> bool {
        self.max_age == 0
    }
}

/// Parse an HTTP-date (IMF-fixdate, or the Netscape `dd-Mon-yyyy` variant).
fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%a, %d-%b-%Y %H:%M:%S GMT")
        .ok()
        .map(|naive| naive.and_utc())
}
