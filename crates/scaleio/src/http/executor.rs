//! Authenticated request execution with a single re-authentication retry.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Response};
use tracing::{debug, info, instrument, trace};

use crate::auth::{Authenticator, CredentialStore, Credentials};
use crate::error::{Error, TransportError};

use super::body::ReplayableBody;
use super::classify::{self, StatusClass, status_class};
use super::transport::Transport;

/// Media type used when no API version is known.
const PLAIN_JSON: &str = "application/json";

/// Result of the first send of a request.
enum Outcome {
    Done(Response),
    /// The session expired and has been renewed; the request must be resent.
    Renewed,
}

/// Sends requests on behalf of a client handle.
///
/// Every request is sent with the current session token. If the gateway
/// answers 401, the session is renewed and the request is sent exactly once
/// more with the same body bytes; the second answer is final.
#[derive(Debug, Clone)]
pub struct Executor {
    transport: Transport,
    store: Arc<CredentialStore>,
    authenticator: Arc<Authenticator>,
    show_http: bool,
}

impl Executor {
    /// Create an executor over shared session state.
    pub fn new(
        transport: Transport,
        store: Arc<CredentialStore>,
        authenticator: Arc<Authenticator>,
        show_http: bool,
    ) -> Self {
        Self {
            transport,
            store,
            authenticator,
            show_http,
        }
    }

    /// Execute a request, returning the successful response unread.
    ///
    /// `path` beginning with `/` replaces the endpoint path; any other path
    /// is appended to it.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] when no response was received. Never retried.
    /// - [`Error::Reauthentication`] when a 401 could not be recovered by
    ///   logging in again.
    /// - [`Error::Api`] or [`Error::Decode`] for error statuses, including a
    ///   401 on the retried request.
    /// - [`Error::UnhandledStatus`] for any other non-success status.
    #[instrument(skip(self, body), fields(body_len = body.as_ref().map(ReplayableBody::len)))]
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<ReplayableBody>,
    ) -> Result<Response, Error> {
        match self.first_attempt(&method, path, body.as_ref()).await? {
            Outcome::Done(response) => Ok(response),
            Outcome::Renewed => self.retry(&method, path, body.as_ref()).await,
        }
    }

    /// Execute a request that must complete within `deadline`.
    ///
    /// On expiry the in-flight request is dropped. A login that had not yet
    /// completed installs nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Timeout`] on expiry, otherwise as
    /// [`execute`](Self::execute).
    pub async fn execute_with_timeout(
        &self,
        method: Method,
        path: &str,
        body: Option<ReplayableBody>,
        deadline: Duration,
    ) -> Result<Response, Error> {
        tokio::time::timeout(deadline, self.execute(method, path, body))
            .await
            .map_err(|_| TransportError::timed_out(deadline))?
    }

    async fn first_attempt(
        &self,
        method: &Method,
        path: &str,
        body: Option<&ReplayableBody>,
    ) -> Result<Outcome, Error> {
        let creds = self.store.get();
        let response = self.send(method, path, body, &creds).await?;

        match status_class(response.status()) {
            StatusClass::Success => Ok(Outcome::Done(response)),
            StatusClass::Expired => {
                classify::drain(response).await;
                info!(epoch = creds.epoch(), "Session expired, re-authenticating");
                self.authenticator
                    .renew(creds.epoch())
                    .await
                    .map_err(Error::Reauthentication)?;
                Ok(Outcome::Renewed)
            }
            StatusClass::Classified => Err(classify::classify_response(response).await),
            StatusClass::Unhandled => Err(classify::unhandled(response).await),
        }
    }

    async fn retry(
        &self,
        method: &Method,
        path: &str,
        body: Option<&ReplayableBody>,
    ) -> Result<Response, Error> {
        let creds = self.store.get();
        debug!(epoch = creds.epoch(), "Retrying with renewed session");
        let response = self.send(method, path, body, &creds).await?;

        match status_class(response.status()) {
            StatusClass::Success => Ok(response),
            StatusClass::Expired | StatusClass::Classified => {
                Err(classify::classify_response(response).await)
            }
            StatusClass::Unhandled => Err(classify::unhandled(response).await),
        }
    }

    async fn send(
        &self,
        method: &Method,
        path: &str,
        body: Option<&ReplayableBody>,
        creds: &Credentials,
    ) -> Result<Response, Error> {
        let url = creds.endpoint().resolve(path);
        debug!(%method, %url, "Sending request");

        let mut request = self
            .transport
            .request(method.clone(), &url)
            .headers(Self::json_headers(creds));

        if let Some(token) = creds.token() {
            request = request.basic_auth("", Some(token.as_str()));
        }

        if let Some(body) = body {
            if self.show_http {
                debug!(body = %String::from_utf8_lossy(body.as_bytes()), "Request body");
            }
            request = request.body(reqwest::Body::from(body.reader()));
        }

        let response = self.transport.send(request).await?;
        trace!(status = %response.status(), "Response received");
        Ok(response)
    }

    fn json_headers(creds: &Credentials) -> HeaderMap {
        let media_type = match creds.version() {
            Some(version) => HeaderValue::from_str(&version.content_type())
                .unwrap_or(HeaderValue::from_static(PLAIN_JSON)),
            None => HeaderValue::from_static(PLAIN_JSON),
        };
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, media_type.clone());
        headers.insert(CONTENT_TYPE, media_type);
        headers
    }
}
