//! The gateway client handle.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::auth::{Authenticator, CredentialStore, Credentials};
use crate::config::ClientConfig;
use crate::error::{DecodeError, Error, TransportError};
use crate::http::{Executor, ReplayableBody, Transport};
use crate::types::{ApiVersion, GatewayUrl};

/// A connection to one gateway.
///
/// Cloning is cheap: clones share the HTTP connection pool, the credential
/// store and the login gate, so an expired session is renewed once for all
/// of them.
///
/// # Example
///
/// ```no_run
/// use scaleio::{Client, ClientConfig, GatewayUrl};
///
/// # async fn example() -> Result<(), scaleio::Error> {
/// let endpoint = GatewayUrl::new("https://gw.example.com/api")?;
/// let client = Client::connect(ClientConfig::new(endpoint)).await?;
/// client.login("admin", "Password123").await?;
///
/// for system in client.systems().await? {
///     println!("{}", system.id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    config: ClientConfig,
    store: Arc<CredentialStore>,
    authenticator: Arc<Authenticator>,
    executor: Executor,
    transport: Transport,
}

impl Client {
    /// Build a client and discover the API version unless one is configured.
    ///
    /// No login is performed; call [`login`](Self::login) next.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be built or version
    /// discovery fails.
    #[instrument(skip(config), fields(endpoint = %config.endpoint))]
    pub async fn connect(config: ClientConfig) -> Result<Self, Error> {
        let transport = Transport::new(&config)?;

        let mut initial = Credentials::anonymous(config.endpoint.clone());
        if let Some(version) = config.version {
            initial = initial.with_version(version);
        }

        let store = Arc::new(CredentialStore::new(initial));
        let authenticator = Arc::new(Authenticator::new(transport.clone(), Arc::clone(&store)));
        let executor = Executor::new(
            transport.clone(),
            Arc::clone(&store),
            Arc::clone(&authenticator),
            config.show_http,
        );

        let version = authenticator.discover_version().await?;
        debug!(%version, "Client ready");

        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                store,
                authenticator,
                executor,
                transport,
            }),
        })
    }

    /// Build a client from `SCALEIO_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment is incomplete or connecting fails.
    pub async fn from_env() -> Result<Self, Error> {
        Self::connect(ClientConfig::from_env()?).await
    }

    /// Log in with a username and password.
    ///
    /// Replaces any credentials and token held by this client (and its
    /// clones) once the gateway accepts the login.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] if the login fails.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<(), Error> {
        let creds = Credentials::new(self.endpoint(), username, password);
        self.login_with(creds).await
    }

    /// Log in with complete credentials, possibly for another endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] if the login fails.
    pub async fn login_with(&self, credentials: Credentials) -> Result<(), Error> {
        self.inner
            .authenticator
            .authenticate_with(credentials)
            .await
            .map_err(Error::Auth)?;
        info!("Logged in");
        Ok(())
    }

    /// Log in again with the stored credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] if the login fails or no credentials are held.
    pub async fn authenticate(&self) -> Result<(), Error> {
        self.inner.authenticator.authenticate().await.map_err(Error::Auth)
    }

    /// Returns the negotiated API version.
    pub fn version(&self) -> Option<ApiVersion> {
        self.inner.store.get().version()
    }

    /// Returns the gateway endpoint.
    pub fn endpoint(&self) -> GatewayUrl {
        self.inner.store.get().endpoint().clone()
    }

    /// Snapshot of the current credentials.
    pub fn credentials(&self) -> Credentials {
        self.inner.store.get()
    }

    /// Whether a session token is held.
    pub fn is_logged_in(&self) -> bool {
        self.inner.store.get().token().is_some()
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Execute a raw request and return the successful response unread.
    ///
    /// # Errors
    ///
    /// See [`Executor::execute`].
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<ReplayableBody>,
    ) -> Result<Response, Error> {
        self.inner.executor.execute(method, path, body).await
    }

    /// Execute a raw request that must complete within `deadline`.
    ///
    /// # Errors
    ///
    /// See [`Executor::execute_with_timeout`].
    pub async fn execute_with_timeout(
        &self,
        method: Method,
        path: &str,
        body: Option<ReplayableBody>,
        deadline: Duration,
    ) -> Result<Response, Error> {
        self.inner
            .executor
            .execute_with_timeout(method, path, body, deadline)
            .await
    }

    /// Execute a request with an optional JSON body.
    ///
    /// Returns `None` when the gateway answers with an empty body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not JSON.
    pub async fn execute_json(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, Error> {
        let body = body.map(ReplayableBody::from_json).transpose()?;
        let response = self.execute(method, path, body).await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        self.decode(status, &bytes).map(Some)
    }

    /// GET a path and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not decode.
    pub async fn get<R>(&self, path: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let response = self.execute(Method::GET, path, None).await?;
        self.read_json(response).await
    }

    /// POST a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not decode.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = ReplayableBody::from_json(body)?;
        let response = self.execute(Method::POST, path, Some(body)).await?;
        self.read_json(response).await
    }

    /// POST a JSON body to an action that answers with no content.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn post_no_response<B>(&self, path: &str, body: &B) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        let body = ReplayableBody::from_json(body)?;
        let response = self.execute(Method::POST, path, Some(body)).await?;
        response.bytes().await.map_err(|e| self.transport_error(e))?;
        Ok(())
    }

    /// Map a failure while reading a response body.
    pub(crate) fn transport_error(&self, err: reqwest::Error) -> TransportError {
        self.inner.transport.error(err)
    }

    async fn read_json<R: DeserializeOwned>(&self, response: Response) -> Result<R, Error> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        self.decode(status, &bytes)
    }

    fn decode<R: DeserializeOwned>(&self, status: u16, bytes: &[u8]) -> Result<R, Error> {
        if self.inner.config.show_http {
            match serde_json::from_slice::<Value>(bytes) {
                Ok(value) => debug!(
                    body = %serde_json::to_string_pretty(&value).unwrap_or_default(),
                    "Response body"
                ),
                Err(_) => debug!(body = %String::from_utf8_lossy(bytes), "Response body"),
            }
        }

        serde_json::from_slice(bytes)
            .map_err(|e| DecodeError::new(status, format!("error decoding response body: {e}")).into())
    }
}
