use super::ensure;
use crate::cookie::Cookie;

/// Assertions over a single [`Cookie`].
#[derive(Debug, Clone, Copy)]
pub struct CookieAssert<'a> {
    cookie: &'a Cookie,
}

impl<'a> CookieAssert<'a> {
    pub fn new(cookie: &'a Cookie) -> Self {
        Self { cookie }
    }

    #[track_caller]
    pub fn is_name_equal_to(&self, name: &str) -> &Self {
        self.field_equal("name", self.cookie.name(), name)
    }

    #[track_caller]
    pub fn is_value_equal_to(&self, value: &str) -> &Self {
        self.field_equal("value", self.cookie.value(), value)
    }

    #[track_caller]
    pub fn is_domain_equal_to(&self, domain: &str) -> &Self {
        self.field_equal("domain", self.cookie.domain(), domain)
    }

    #[track_caller]
    pub fn is_path_equal_to(&self, path: &str) -> &Self {
        self.field_equal("path", self.cookie.path(), path)
    }

    #[track_caller]
    pub fn has_max_age(&self, max_age: i64) -> &Self {
        let actual = self.cookie.max_age();
        ensure(actual == max_age, || {
            format!("Expected max age of cookie to be {max_age} but was {actual}")
        });
        self
    }

    /// The cookie outlives the client session (max-age > 0).
    #[track_caller]
    pub fn is_persistent(&self) -> &Self {
        let actual = self.cookie.max_age();
        ensure(self.cookie.is_persistent(), || {
            format!("Expected cookie to be persistent but max-age is equal to {actual}")
        });
        self
    }

    /// The cookie is a session cookie (max-age < 0).
    #[track_caller]
    pub fn is_not_persistent(&self) -> &Self {
        let actual = self.cookie.max_age();
        ensure(self.cookie.is_session(), || {
            format!("Expected cookie not to be persistent but max-age is equal to {actual}")
        });
        self
    }

    /// The response asks the client to delete the cookie (max-age == 0).
    #[track_caller]
    pub fn will_be_deleted(&self) -> &Self {
        let actual = self.cookie.max_age();
        ensure(self.cookie.is_expired(), || {
            format!("Expected cookie to be deleted but max-age is equal to {actual}")
        });
        self
    }

    #[track_caller]
    pub fn is_secure(&self) -> &Self {
        ensure(self.cookie.is_secure(), || {
            "Expected cookie to be secure".to_string()
        });
        self
    }

    #[track_caller]
    pub fn is_not_secure(&self) -> &Self {
        ensure(!self.cookie.is_secure(), || {
            "Expected cookie not to be secure".to_string()
        });
        self
    }

    #[track_caller]
    pub fn is_http_only(&self) -> &Self {
        ensure(self.cookie.is_http_only(), || {
            "Expected cookie to be http only".to_string()
        });
        self
    }

    #[track_caller]
    pub fn is_not_http_only(&self) -> &Self {
        ensure(!self.cookie.is_http_only(), || {
            "Expected cookie not to be http only".to_string()
        });
        self
    }

    #[track_caller]
    fn field_equal(&self, field: &str, actual: &str, expected: &str) -> &Self {
        ensure(actual == expected, || {
            format!("Expected {field} of cookie to be {expected} but was {actual}")
        });
        self
    }
}
