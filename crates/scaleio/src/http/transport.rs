//! TLS-capable HTTP transport.

use std::time::Duration;

use reqwest::{Certificate, Method, RequestBuilder};
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, InvalidInputError, TransportError};

/// TLS handshake and connect budget used when building the client.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(120);

/// Immutable HTTP client shared by every request on a client handle.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl Transport {
    /// Build the transport from client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the CA bundle cannot be read or parsed, or the
    /// TLS stack cannot be initialised.
    #[instrument(skip(config), fields(insecure = config.insecure, ca_cert = ?config.ca_cert))]
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("scaleio-rs/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .danger_accept_invalid_certs(config.insecure);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(path) = &config.ca_cert {
            debug!("Setting up custom CA bundle");
            let pem = std::fs::read(path).map_err(|e| InvalidInputError::Config {
                message: format!("cannot read CA bundle {}: {e}", path.display()),
            })?;
            let certs = Certificate::from_pem_bundle(&pem).map_err(|e| TransportError::Tls {
                message: format!("invalid CA bundle {}: {e}", path.display()),
            })?;
            for cert in certs {
                builder = builder.add_root_certificate(cert);
            }
        }

        let client = builder.build().map_err(|e| TransportError::Tls {
            message: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Start a request.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send a request, mapping network failures to [`TransportError`].
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<reqwest::Response, TransportError> {
        request.send().await.map_err(|e| self.error(e))
    }

    /// Map a failure of a request sent by this transport.
    ///
    /// Timeouts report the budget that expired: the connect timeout while
    /// connecting, the configured request timeout otherwise.
    pub(crate) fn error(&self, err: reqwest::Error) -> TransportError {
        let limit = if err.is_connect() {
            Some(CONNECT_TIMEOUT)
        } else {
            self.timeout
        };
        match TransportError::from(err) {
            TransportError::Timeout { .. } => match limit {
                Some(limit) => TransportError::timed_out(limit),
                None => TransportError::Timeout { duration_ms: None },
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GatewayUrl;

    fn config() -> ClientConfig {
        ClientConfig::new(GatewayUrl::new("https://gw.example.com/api").unwrap())
    }

    #[test]
    fn builds_default_transport() {
        assert!(Transport::new(&config()).is_ok());
    }

    #[test]
    fn builds_insecure_transport() {
        assert!(Transport::new(&config().insecure(true)).is_ok());
    }

    #[test]
    fn missing_ca_bundle_is_a_config_error() {
        let err = Transport::new(&config().with_ca_cert("/nonexistent/ca.pem")).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::Config { .. })
        ));
    }
}
