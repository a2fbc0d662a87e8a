use super::{check, ensure, ensure_all, fail, CookieAssert, JsonAssert};
use crate::content_type::{self, mime};
use crate::cookie::Cookie;
use crate::error::{AssertionError, ResponseError};
use crate::response::Response;

const UTF8: &str = "utf-8";

/// Generates assertions for a single expected status code.
macro_rules! status_shortcuts {
    ($($(#[$meta:meta])* $name:ident => $code:expr;)*) => {
        $(
            $(#[$meta])*
            #[track_caller]
            pub fn $name(&self) -> &Self {
                self.is_status_equal_to($code)
            }
        )*
    };
}

/// Generates assertions for a set of accepted mime types.
macro_rules! mime_shortcuts {
    ($($name:ident => [$($mime:expr),+];)*) => {
        $(
            #[track_caller]
            pub fn $name(&self) -> &Self {
                self.is_mime_type_in(&[$($mime),+])
            }
        )*
    };
}

/// Assertions over a [`Response`].
#[derive(Debug, Clone, Copy)]
pub struct ResponseAssert<'a> {
    response: &'a Response,
}

impl<'a> ResponseAssert<'a> {
    pub fn new(response: &'a Response) -> Self {
        Self { response }
    }

    // Status

    #[track_caller]
    pub fn is_status_equal_to(&self, status: u16) -> &Self {
        let actual = self.response.status();
        ensure(actual == status, || {
            format!("Expected status code to be {status} but was {actual}")
        });
        self
    }

    #[track_caller]
    pub fn is_status_not_equal_to(&self, status: u16) -> &Self {
        let actual = self.response.status();
        ensure(actual != status, || {
            format!("Expected status code not to be {status} but was {actual}")
        });
        self
    }

    /// Bounds are inclusive.
    #[track_caller]
    pub fn is_status_between(&self, start: u16, end: u16) -> &Self {
        let actual = self.response.status();
        ensure((start..=end).contains(&actual), || {
            format!("Expected status code to be between {start} and {end} but was {actual}")
        });
        self
    }

    #[track_caller]
    pub fn is_status_not_between(&self, start: u16, end: u16) -> &Self {
        let actual = self.response.status();
        ensure(!(start..=end).contains(&actual), || {
            format!("Expected status code not to be between {start} and {end} but was {actual}")
        });
        self
    }

    /// 2xx
    #[track_caller]
    pub fn is_success(&self) -> &Self {
        self.is_status_between(200, 299)
    }

    /// 3xx
    #[track_caller]
    pub fn is_redirection(&self) -> &Self {
        self.is_status_between(300, 399)
    }

    /// 4xx
    #[track_caller]
    pub fn is_client_error(&self) -> &Self {
        self.is_status_between(400, 499)
    }

    /// 5xx
    #[track_caller]
    pub fn is_server_error(&self) -> &Self {
        self.is_status_between(500, 599)
    }

    status_shortcuts! {
        /// 200 OK
        is_ok => 200;
        /// 201 Created
        is_created => 201;
        is_accepted => 202;
        is_non_authoritative_information => 203;
        /// 204 No Content
        is_no_content => 204;
        is_reset_content => 205;
        is_partial_content => 206;
        is_multiple_choices => 300;
        is_moved_permanently => 301;
        /// 302 Found
        is_moved_temporarily => 302;
        is_see_other => 303;
        is_not_modified => 304;
        is_bad_request => 400;
        is_unauthorized => 401;
        is_forbidden => 403;
        /// 404 Not Found
        is_not_found => 404;
        is_method_not_allowed => 405;
        is_internal_server_error => 500;
        is_not_implemented => 501;
    }

    // Headers

    /// The header name is matched case-insensitively.
    #[track_caller]
    pub fn has_header(&self, name: &str) -> &Self {
        ensure(self.response.header(name).is_some(), || {
            format!("Expected header {name} to be defined")
        });
        self
    }

    #[track_caller]
    pub fn has_header_equal_to(&self, name: &str, value: &str) -> &Self {
        self.has_header(name);
        let actual = self.response.header(name).unwrap_or_default();
        ensure(actual == value, || {
            format!("Expected header {name} to be {value} but was {actual}")
        });
        self
    }

    #[track_caller]
    pub fn has_etag(&self) -> &Self {
        ensure(self.response.header("etag").is_some(), || {
            "Expected ETag value to be defined".to_string()
        });
        self
    }

    #[track_caller]
    pub fn has_etag_equal_to(&self, etag: &str) -> &Self {
        self.has_etag();
        let actual = self.response.header("etag").unwrap_or_default();
        ensure(actual == etag, || {
            format!("Expected ETag to be {etag} but was {actual}")
        });
        self
    }

    // Content-Type

    #[track_caller]
    pub fn has_content_type(&self) -> &Self {
        let defined = self
            .response
            .content_type()
            .is_some_and(|ct| !ct.trim().is_empty());
        ensure(defined, || {
            "Expected Content-Type to be defined and not empty".to_string()
        });
        self
    }

    /// Compares the mime type only, ignoring case and parameters.
    #[track_caller]
    pub fn is_mime_type_equal_to(&self, mime_type: &str) -> &Self {
        let actual = self.mime_type();
        ensure(actual.eq_ignore_ascii_case(mime_type), || {
            format!("Expected Content-Type to be {mime_type} but was {actual}")
        });
        self
    }

    #[track_caller]
    pub fn is_mime_type_in(&self, mime_types: &[&str]) -> &Self {
        if let [mime_type] = mime_types {
            return self.is_mime_type_equal_to(mime_type);
        }
        let actual = self.mime_type();
        let found = mime_types
            .iter()
            .any(|expected| actual.eq_ignore_ascii_case(expected));
        ensure(found, || {
            format!(
                "Expected Content-Type to be one of {} but was {actual}",
                mime_types.join(", ")
            )
        });
        self
    }

    mime_shortcuts! {
        is_octet_stream => [mime::OCTET_STREAM];
        is_json => [mime::JSON];
        is_xml => [mime::XML, mime::TEXT_XML];
        is_css => [mime::CSS];
        is_javascript => [mime::JAVASCRIPT, mime::TEXT_JAVASCRIPT];
        is_text_plain => [mime::TEXT_PLAIN];
        is_html => [mime::HTML];
        is_xhtml => [mime::XHTML];
        is_html_or_xhtml => [mime::HTML, mime::XHTML];
        is_pdf => [mime::PDF];
        is_csv => [mime::CSV];
        is_zip => [mime::ZIP];
        is_flash_content => [mime::FLASH, mime::FLV];
    }

    #[track_caller]
    pub fn has_charset(&self) -> &Self {
        match self.charset() {
            None => fail(AssertionError::new(
                "Expected charset to be defined in Content-Type value",
            )),
            Some(charset) if charset.is_empty() => fail(AssertionError::new(
                "Expected charset not to be empty in Content-Type value",
            )),
            Some(_) => self,
        }
    }

    /// The charset is compared case-insensitively.
    #[track_caller]
    pub fn is_charset_equal_to(&self, charset: &str) -> &Self {
        self.has_charset();
        let actual = self.charset().unwrap_or_default();
        ensure(actual.eq_ignore_ascii_case(charset), || {
            format!("Expected charset to be {charset} but was {actual}")
        });
        self
    }

    #[track_caller]
    pub fn is_utf8(&self) -> &Self {
        self.is_charset_equal_to(UTF8)
    }

    #[track_caller]
    pub fn is_json_utf8(&self) -> &Self {
        self.is_json().is_utf8()
    }

    #[track_caller]
    pub fn is_xml_utf8(&self) -> &Self {
        self.is_xml().is_utf8()
    }

    /// HTML or XHTML, encoded in UTF-8.
    #[track_caller]
    pub fn is_html_utf8(&self) -> &Self {
        self.is_html_or_xhtml().is_utf8()
    }

    // Cookies

    /// The cookie name is matched case-insensitively.
    #[track_caller]
    pub fn has_cookie(&self, name: &str) -> &Self {
        self.find_cookie(name);
        self
    }

    #[track_caller]
    pub fn has_cookie_equal_to(&self, name: &str, value: &str) -> &Self {
        let actual = self.find_cookie(name).value();
        ensure(actual == value, || {
            format!("Expected cookie {name} to be {value} but was {actual}")
        });
        self
    }

    /// Check that the response sets a cookie with the same value, domain,
    /// path, max-age and secure flag as `expected`.
    ///
    /// All mismatching fields are reported together.
    #[track_caller]
    pub fn has_cookie_matching(&self, expected: &Cookie) -> &Self {
        let name = expected.name();
        let actual = self.find_cookie(name);

        let mut failures = Vec::new();
        let mut compare = |field: &str, expected: String, actual: String| {
            check(&mut failures, expected == actual, || {
                format!("Expected cookie {name} to have {field} equal to {expected} but was {actual}")
            });
        };
        compare("value", expected.value().to_string(), actual.value().to_string());
        compare("domain", expected.domain().to_string(), actual.domain().to_string());
        compare("path", expected.path().to_string(), actual.path().to_string());
        compare("max age", expected.max_age().to_string(), actual.max_age().to_string());
        compare("secure", expected.is_secure().to_string(), actual.is_secure().to_string());

        ensure_all(failures);
        self
    }

    /// Switch to assertions over the named cookie.
    #[track_caller]
    pub fn cookie(&self, name: &str) -> CookieAssert<'a> {
        CookieAssert::new(self.find_cookie(name))
    }

    // Body

    /// Switch to assertions over the JSON body.
    #[track_caller]
    pub fn json(&self) -> JsonAssert {
        match self.response.json() {
            Ok(json) => JsonAssert::from_value(json),
            Err(ResponseError::MissingBody) => {
                fail(AssertionError::new("Expected response body to be defined"))
            }
            Err(_) => fail(AssertionError::new("Expected json to be valid")),
        }
    }

    #[track_caller]
    fn find_cookie(&self, name: &str) -> &'a Cookie {
        match self.response.cookie(name) {
            Some(cookie) => cookie,
            None => fail(AssertionError::new(format!(
                "Expected cookie {name} to be defined"
            ))),
        }
    }

    fn mime_type(&self) -> String {
        self.response
            .content_type()
            .map(content_type::mime_type)
            .unwrap_or_default()
    }

    fn charset(&self) -> Option<String> {
        self.response.content_type().and_then(content_type::charset)
    }
}
