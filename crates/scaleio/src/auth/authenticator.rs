//! Login and version discovery.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::ACCEPT;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::error::{AuthError, DecodeError, Error};
use crate::http::Transport;
use crate::http::classify::{self, is_success};
use crate::types::ApiVersion;

use super::credentials::Credentials;
use super::store::CredentialStore;
use super::tokens::SessionToken;

/// Path of the login call, relative to the endpoint.
const LOGIN_PATH: &str = "login";

/// Path of the version call, absolute on the gateway host.
const VERSION_PATH: &str = "/api/version";

/// Performs the login exchange and version discovery for one credential store.
///
/// Logins are serialized: only one runs at a time per store, and a renewal
/// requested for a token that has already been replaced is skipped.
#[derive(Debug)]
pub struct Authenticator {
    transport: Transport,
    store: Arc<CredentialStore>,
    gate: Mutex<()>,
}

impl Authenticator {
    /// Create an authenticator writing into `store`.
    pub fn new(transport: Transport, store: Arc<CredentialStore>) -> Self {
        Self {
            transport,
            store,
            gate: Mutex::new(()),
        }
    }

    /// Log in with the stored username and password and install the token.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] on any failure; the store is left untouched.
    #[instrument(skip(self))]
    pub async fn authenticate(&self) -> Result<(), AuthError> {
        let _guard = self.gate.lock().await;
        self.refresh_token().await
    }

    /// Log in with replacement credentials.
    ///
    /// Only after the login succeeds are the new credentials and token
    /// swapped into the store, together.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] on any failure; the store is left untouched.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn authenticate_with(&self, mut credentials: Credentials) -> Result<(), AuthError> {
        let _guard = self.gate.lock().await;
        if credentials.version().is_none()
            && let Some(version) = self.store.get().version()
        {
            credentials = credentials.with_version(version);
        }
        let token = self.login(&credentials).await?;
        self.store.set_credentials(credentials.with_token(token));
        info!("Session created");
        Ok(())
    }

    /// Renew the session after a request carrying the token of
    /// `stale_epoch` was rejected.
    ///
    /// When another caller has installed a newer token in the meantime, that
    /// token is reused and no login is sent.
    pub(crate) async fn renew(&self, stale_epoch: u64) -> Result<(), AuthError> {
        let _guard = self.gate.lock().await;
        if self.store.epoch() != stale_epoch {
            debug!("Session already renewed by a concurrent request");
            return Ok(());
        }
        self.refresh_token().await
    }

    /// Discover the gateway API version, caching it in the store.
    ///
    /// Returns the stored version without a round trip when one is known.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the body is not a version string.
    #[instrument(skip(self))]
    pub async fn discover_version(&self) -> Result<ApiVersion, Error> {
        let creds = self.store.get();
        if let Some(version) = creds.version() {
            return Ok(version);
        }

        let url = creds.endpoint().resolve(VERSION_PATH);
        debug!(%url, "Querying API version");
        let response = self
            .transport
            .send(self.transport.request(Method::GET, &url))
            .await?;

        let status = response.status();
        if !is_success(status) {
            return Err(classify::classify_response(response).await);
        }

        let body = response.text().await.map_err(|e| self.transport.error(e))?;
        let version = ApiVersion::parse(&body).map_err(|_| {
            DecodeError::new(
                status.as_u16(),
                format!("unrecognised API version {:?}", body.trim()),
            )
        })?;

        self.store.set_version(version);
        debug!(%version, "Negotiated API version");
        Ok(version)
    }

    async fn refresh_token(&self) -> Result<(), AuthError> {
        let creds = self.store.get();
        let token = self.login(&creds).await?;
        let epoch = self.store.set_token(token);
        info!(epoch, "Session token installed");
        Ok(())
    }

    async fn login(&self, creds: &Credentials) -> Result<SessionToken, AuthError> {
        if !creds.has_login() {
            return Err(AuthError::MissingCredentials);
        }

        let url = creds.endpoint().resolve(LOGIN_PATH);
        debug!(%url, "Sending login");

        let mut request = self
            .transport
            .request(Method::GET, &url)
            .basic_auth(creds.username(), Some(creds.password()));
        if let Some(version) = creds.version() {
            request = request.header(ACCEPT, version.content_type());
        }

        let response = self.transport.send(request).await?;
        let status = response.status();
        debug!(%status, "Login response");

        if !is_success(status) {
            return Err(match classify::read_error(response).await {
                Ok(api) => AuthError::Rejected(api),
                Err(decode) => AuthError::Undecodable(decode),
            });
        }

        let body = response.text().await.map_err(|e| self.transport.error(e))?;
        SessionToken::from_login_body(&body).ok_or(AuthError::EmptyToken)
    }
}
