//! Session token type.

use std::fmt;

/// An opaque session token issued by the gateway login.
///
/// The token travels as the password field of HTTP Basic authentication.
/// It has no client-visible expiry; the gateway signals expiry with a 401.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Build a token from a login response body, stripping the JSON quotes.
    ///
    /// Returns `None` when nothing is left after stripping.
    pub(crate) fn from_login_body(body: &str) -> Option<Self> {
        let token = body.trim().trim_matches('"');
        if token.is_empty() {
            None
        } else {
            Some(Self::new(token))
        }
    }

    /// Returns the token value.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers or persisting
    /// the session.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_hides_value_in_debug() {
        let token = SessionToken::new("YWRtaW46MTY0NzM0MzQ3MDg0MjpiZmVi");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("YWRt"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn login_body_quotes_are_stripped() {
        let token = SessionToken::from_login_body("\"abc123\"").unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn empty_login_body_has_no_token() {
        assert!(SessionToken::from_login_body("\"\"").is_none());
        assert!(SessionToken::from_login_body("").is_none());
    }
}
