//! Gateway URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated gateway endpoint URL, usually ending in `/api`.
///
/// The URL must be absolute and use HTTPS (or HTTP for localhost).
///
/// # Example
///
/// ```
/// use scaleio::GatewayUrl;
///
/// let gw = GatewayUrl::new("https://gateway.example.com/api").unwrap();
/// assert_eq!(gw.resolve("login"), "https://gateway.example.com/api/login");
/// assert_eq!(
///     gw.resolve("/api/types/Volume/instances"),
///     "https://gateway.example.com/api/types/Volume/instances"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GatewayUrl(Url);

impl GatewayUrl {
    /// Create a new gateway URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::Endpoint {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Resolve a request path against this endpoint.
    ///
    /// A path starting with `/` replaces the endpoint's path (link hrefs
    /// returned by the gateway are of this form). Any other path is appended
    /// to the endpoint's path.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.origin(), path)
        } else {
            let base = self.0.as_str().trim_end_matches('/');
            format!("{}/{}", base, path)
        }
    }

    /// Returns `scheme://host[:port]` without a trailing slash.
    pub fn origin(&self) -> String {
        self.0.origin().ascii_serialization()
    }

    /// Returns the full URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for GatewayUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GatewayUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for GatewayUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for GatewayUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        GatewayUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for GatewayUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
