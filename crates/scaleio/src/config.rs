//! Client construction settings.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, InvalidInputError};
use crate::types::{ApiVersion, GatewayUrl};

/// Environment variable naming the gateway endpoint (required by `from_env`).
pub const ENV_ENDPOINT: &str = "SCALEIO_ENDPOINT";
/// Environment variable pinning the API version; discovered when unset.
pub const ENV_VERSION: &str = "SCALEIO_VERSION";
/// Environment variable disabling certificate verification when `true`.
pub const ENV_INSECURE: &str = "SCALEIO_INSECURE";
/// Environment variable naming a PEM CA bundle to trust.
pub const ENV_CA_CERT: &str = "SCALEIO_CA_CERT";
/// Environment variable enabling debug logging when `true`.
pub const ENV_DEBUG: &str = "SCALEIO_DEBUG";
/// Environment variable enabling request/response body logging when `true`.
pub const ENV_SHOW_HTTP: &str = "SCALEIO_SHOW_HTTP";
/// Environment variable holding a per-request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "SCALEIO_TIMEOUT_SECS";

/// Settings used to build a [`Client`](crate::Client).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use scaleio::{ApiVersion, ClientConfig, GatewayUrl};
///
/// let config = ClientConfig::new(GatewayUrl::new("https://gw.example.com/api").unwrap())
///     .with_version(ApiVersion::new(3, 5))
///     .with_timeout(Duration::from_secs(30));
/// assert!(!config.insecure);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gateway endpoint, usually ending in `/api`.
    pub endpoint: GatewayUrl,
    /// API version to use; discovered from the gateway when `None`.
    pub version: Option<ApiVersion>,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// PEM bundle of additional trusted CA certificates.
    pub ca_cert: Option<PathBuf>,
    /// Verbose logging requested by the environment.
    pub debug: bool,
    /// Log request bodies and pretty-printed response bodies.
    pub show_http: bool,
    /// Overall timeout applied to every HTTP request.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Default settings for an endpoint.
    pub fn new(endpoint: GatewayUrl) -> Self {
        Self {
            endpoint,
            version: None,
            insecure: false,
            ca_cert: None,
            debug: false,
            show_http: false,
            timeout: None,
        }
    }

    /// Read settings from `SCALEIO_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is missing or any value is malformed.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    ///
    /// Boolean settings are enabled only by the exact value `true`. Empty
    /// values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is missing or any value is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let flag = |key: &str| get(key).is_some_and(|v| v == "true");

        let endpoint = get(ENV_ENDPOINT).ok_or_else(|| InvalidInputError::Config {
            message: format!("{ENV_ENDPOINT} is not set"),
        })?;

        let version = get(ENV_VERSION)
            .map(|v| ApiVersion::parse(&v))
            .transpose()?;

        let timeout = get(ENV_TIMEOUT_SECS)
            .map(|v| {
                v.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| InvalidInputError::Config {
                        message: format!("{ENV_TIMEOUT_SECS}={v:?}: {e}"),
                    })
            })
            .transpose()?;

        Ok(Self {
            endpoint: GatewayUrl::new(endpoint)?,
            version,
            insecure: flag(ENV_INSECURE),
            ca_cert: get(ENV_CA_CERT).map(PathBuf::from),
            debug: flag(ENV_DEBUG),
            show_http: flag(ENV_SHOW_HTTP),
            timeout,
        })
    }

    /// Pin the API version instead of discovering it.
    pub fn with_version(mut self, version: ApiVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Enable or disable certificate verification bypass.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Trust the CA certificates in a PEM bundle.
    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert = Some(path.into());
        self
    }

    /// Log HTTP bodies at debug level.
    pub fn show_http(mut self, show_http: bool) -> Self {
        self.show_http = show_http;
        self
    }

    /// Apply an overall timeout to every HTTP request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_all_settings() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "https://gw.example.com/api"),
            (ENV_VERSION, "2.0"),
            (ENV_INSECURE, "true"),
            (ENV_CA_CERT, "/etc/ssl/gw.pem"),
            (ENV_DEBUG, "true"),
            (ENV_SHOW_HTTP, "true"),
            (ENV_TIMEOUT_SECS, "45"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint.host(), Some("gw.example.com"));
        assert_eq!(config.version, Some(ApiVersion::new(2, 0)));
        assert!(config.insecure);
        assert_eq!(config.ca_cert, Some(PathBuf::from("/etc/ssl/gw.pem")));
        assert!(config.debug);
        assert!(config.show_http);
        assert_eq!(config.timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn flags_require_literal_true() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "https://gw.example.com/api"),
            (ENV_INSECURE, "1"),
            (ENV_DEBUG, "TRUE"),
        ]))
        .unwrap();
        assert!(!config.insecure);
        assert!(!config.debug);
    }

    #[test]
    fn empty_version_means_discover() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "https://gw.example.com/api"),
            (ENV_VERSION, ""),
        ]))
        .unwrap();
        assert!(config.version.is_none());
    }

    #[test]
    fn endpoint_is_required() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains(ENV_ENDPOINT));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let result = ClientConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "https://gw.example.com/api"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]));
        assert!(result.is_err());
    }
}
