//! Connection credentials type.

use std::fmt;

use crate::types::{ApiVersion, GatewayUrl};

use super::tokens::SessionToken;

/// Everything needed to talk to one gateway: where it is, who we are, which
/// API version was negotiated and the current session token.
///
/// A `Credentials` value is a snapshot; the live copy is kept in a
/// [`CredentialStore`](super::CredentialStore).
///
/// # Security
///
/// Neither the password nor the token is exposed in Debug output.
///
/// # Example
///
/// ```
/// use scaleio::{Credentials, GatewayUrl};
///
/// let endpoint = GatewayUrl::new("https://gw.example.com/api").unwrap();
/// let creds = Credentials::new(endpoint, "admin", "Password123");
/// assert_eq!(creds.username(), "admin");
/// assert!(creds.token().is_none());
/// ```
#[derive(Clone)]
pub struct Credentials {
    endpoint: GatewayUrl,
    username: String,
    password: String,
    version: Option<ApiVersion>,
    token: Option<SessionToken>,
    epoch: u64,
}

impl Credentials {
    /// Create credentials for an endpoint with a username and password.
    pub fn new(
        endpoint: GatewayUrl,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint,
            username: username.into(),
            password: password.into(),
            version: None,
            token: None,
            epoch: 0,
        }
    }

    /// Credentials for an endpoint with no login configured yet.
    pub fn anonymous(endpoint: GatewayUrl) -> Self {
        Self::new(endpoint, "", "")
    }

    /// Attach a known API version.
    pub fn with_version(mut self, version: ApiVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Attach a session token, e.g. one restored from an earlier run.
    pub fn with_token(mut self, token: SessionToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Returns the gateway endpoint.
    pub fn endpoint(&self) -> &GatewayUrl {
        &self.endpoint
    }

    /// Returns the login username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing the login request.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Returns the negotiated API version, if known.
    pub fn version(&self) -> Option<ApiVersion> {
        self.version
    }

    /// Returns the current session token, if logged in.
    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// Number of token installations the store had seen when this snapshot
    /// was taken.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a username has been configured for login.
    pub fn has_login(&self) -> bool {
        !self.username.is_empty()
    }

    pub(super) fn set_version(&mut self, version: ApiVersion) {
        self.version = Some(version);
    }

    pub(super) fn install_token(&mut self, token: SessionToken) {
        self.token = Some(token);
        self.epoch += 1;
    }

    pub(super) fn set_epoch(&mut self, epoch: u64) {
        self.epoch = epoch;
    }
}

// Intentionally hide password and token in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint.as_str())
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("version", &self.version)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("epoch", &self.epoch)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> GatewayUrl {
        GatewayUrl::new("https://gw.example.com/api").unwrap()
    }

    #[test]
    fn credentials_hide_secrets_in_debug() {
        let creds = Credentials::new(endpoint(), "admin", "secret123")
            .with_token(SessionToken::new("tok-987"));
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("secret123"));
        assert!(!debug.contains("tok-987"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn anonymous_has_no_login() {
        assert!(!Credentials::anonymous(endpoint()).has_login());
        assert!(Credentials::new(endpoint(), "admin", "pw").has_login());
    }

    #[test]
    fn installing_a_token_advances_the_epoch() {
        let mut creds = Credentials::anonymous(endpoint());
        creds.install_token(SessionToken::new("a"));
        creds.install_token(SessionToken::new("b"));
        assert_eq!(creds.epoch(), 2);
        assert_eq!(creds.token().unwrap().as_str(), "b");
    }
}
