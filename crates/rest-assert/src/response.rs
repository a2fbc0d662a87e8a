//! Materialized HTTP response.

use crate::cookie::Cookie;
use crate::error::ResponseError;
use bytes::Bytes;
use http::header;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// An HTTP response snapshot that assertions run against.
///
/// Header names are stored lower-cased so lookups are case-insensitive.
#[derive(Clone, Default)]
pub struct Response {
    status: u16,
    content_type: Option<String>,
    headers: HashMap<String, String>,
    cookies: Vec<Cookie>,
    body: Option<Bytes>,
}

impl Response {
    /// Create a response with no headers, cookies or body.
    pub fn new(status: u16, content_type: Option<&str>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            ..Default::default()
        }
    }

    /// Add headers. Names are lower-cased; later values replace earlier ones.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers
                .insert(name.as_ref().to_ascii_lowercase(), value.into());
        }
        self
    }

    #[must_use]
    pub fn with_cookies(mut self, cookies: Vec<Cookie>) -> Self {
        self.cookies = cookies;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Snapshot an [`http::Response`].
    ///
    /// Only the first value of a repeated header is kept, except for
    /// `Set-Cookie` where every value is parsed. Unparsable cookies are
    /// skipped.
    pub fn from_http<B: AsRef<[u8]>>(response: &http::Response<B>) -> Self {
        let mut headers = HashMap::new();
        for name in response.headers().keys() {
            match response.headers().get(name).map(|v| v.to_str()) {
                Some(Ok(value)) => {
                    headers.insert(name.as_str().to_string(), value.to_string());
                }
                Some(Err(_)) => warn!("Skipping non-ASCII value of header {}", name),
                None => {}
            }
        }

        let cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|raw| match Cookie::parse_set_cookie(raw) {
                Ok(cookie) => Some(cookie),
                Err(e) => {
                    warn!("Skipping unparsable Set-Cookie header: {}", e);
                    None
                }
            })
            .collect();

        let content_type = headers.get(header::CONTENT_TYPE.as_str()).cloned();

        Self {
            status: response.status().as_u16(),
            content_type,
            headers,
            cookies,
            body: Some(Bytes::copy_from_slice(response.body().as_ref())),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// The explicit Content-Type, falling back to the `content-type` header.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .or_else(|| self.header(header::CONTENT_TYPE.as_str()))
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Look up a header value by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Find a cookie by name, ignoring case.
    pub fn cookie(&self, name: &str) -> Option<&Cookie> {
        self.cookies
            .iter()
            .find(|cookie| cookie.name().eq_ignore_ascii_case(name))
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Returns the body as text.
    pub fn text(&self) -> Result<&str, ResponseError> {
        let body = self.body.as_ref().ok_or(ResponseError::MissingBody)?;
        Ok(std::str::from_utf8(body)?)
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, ResponseError> {
        let body = self.body.as_ref().ok_or(ResponseError::MissingBody)?;
        Ok(serde_json::from_slice(body)?)
    }
}

impl<B: AsRef<[u8]>> From<&http::Response<B>> for Response {
    fn from(response: &http::Response<B>) -> Self {
        Self::from_http(response)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .field("headers", &self.headers)
            .field("cookies", &self.cookies)
            .field("body_len", &self.body.as_ref().map(Bytes::len))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_new_is_empty() {
        let response = Response::new(200, Some("application/json"));
        assert_eq!(response.status(), 200);
        assert_eq!(response.content_type(), Some("application/json"));
        assert!(response.headers().is_empty());
        assert!(response.cookies().is_empty());
        assert!(response.body().is_none());
    }

    #[test]
    fn test_headers_are_lowercased() {
        let response = Response::new(200, None)
            .with_headers([("Header", "name"), ("X-Request-Id", "42")]);
        assert_eq!(response.headers().len(), 2);
        assert!(response.headers().contains_key("header"));
        assert_eq!(response.header("Header"), Some("name"));
        assert_eq!(response.header("header"), Some("name"));
        assert_eq!(response.header("HEADER"), Some("name"));
        assert_eq!(response.header("FOO"), None);
    }

    #[test]
    fn test_cookie_lookup_ignores_case() {
        let response = Response::new(200, None).with_cookies(vec![
            Cookie::new("cookie1", "value1"),
            Cookie::new("cookie2", "value2"),
        ]);
        assert_eq!(response.cookies().len(), 2);
        assert!(response.cookie("cookie1").is_some());
        assert!(response.cookie("COOKIE1").is_some());
        assert_eq!(response.cookie("cookie2").unwrap().value(), "value2");
        assert!(response.cookie("foo").is_none());
    }

    #[test]
    fn test_content_type_falls_back_to_header() {
        let response =
            Response::new(200, None).with_headers([("Content-Type", "text/html; charset=utf-8")]);
        assert_eq!(response.content_type(), Some("text/html; charset=utf-8"));
    }

    #[test]
    fn test_from_http() {
        let http_response = http::Response::builder()
            .status(201)
            .header("Content-Type", "application/json; charset=utf-8")
            .header("ETag", "\"v1\"")
            .header("Set-Cookie", "session=abc; Path=/; HttpOnly")
            .header("Set-Cookie", "theme=dark; Max-Age=60")
            .body(r#"{"id": 1}"#)
            .unwrap();

        let response = Response::from_http(&http_response);
        assert_eq!(response.status(), 201);
        assert_eq!(
            response.content_type(),
            Some("application/json; charset=utf-8")
        );
        assert_eq!(response.header("etag"), Some("\"v1\""));
        assert_eq!(response.cookies().len(), 2);
        assert!(response.cookie("session").unwrap().is_http_only());
        assert_eq!(response.cookie("theme").unwrap().max_age(), 60);
        assert_eq!(response.text().unwrap(), r#"{"id": 1}"#);
        assert_eq!(response.json().unwrap()["id"], 1);
    }

    #[traced_test]
    #[test]
    fn test_from_http_skips_bad_cookies() {
        let http_response = http::Response::builder()
            .status(200)
            .header("Set-Cookie", "garbage")
            .header("Set-Cookie", "ok=1")
            .body(Vec::new())
            .unwrap();

        let response = Response::from_http(&http_response);
        assert_eq!(response.cookies().len(), 1);
        assert!(logs_contain("Skipping unparsable Set-Cookie header"));
    }

    #[test]
    fn test_body_errors() {
        let response = Response::new(200, None);
        assert!(matches!(response.text(), Err(ResponseError::MissingBody)));

        let response = Response::new(200, None).with_body(vec![0xff, 0xfe]);
        assert!(matches!(response.text(), Err(ResponseError::InvalidUtf8(_))));

        let response = Response::new(200, None).with_body("not json");
        assert!(matches!(response.json(), Err(ResponseError::Json(_))));
    }
}
