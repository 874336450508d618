//! Error types for the scaleio library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, server-reported, decoding and input
//! validation failures.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The unified error type for scaleio operations.
///
/// Callers can tell an expired session that could not be renewed
/// ([`Error::Reauthentication`]) apart from a failed operation
/// ([`Error::Api`]) and from an explicit login failure ([`Error::Auth`]).
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// An explicit login attempt failed.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The session expired and renewing it failed.
    #[error("error re-authenticating: {0}")]
    Reauthentication(#[source] AuthError),

    /// Structured error reported by the gateway.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The gateway answered with a status this client does not handle.
    #[error("unhandled API response, please report this issue, status code: {status}")]
    UnhandledStatus { status: u16 },

    /// A response body did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Input validation errors (endpoint URL, version string, configuration).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A lookup matched nothing.
    #[error("not found: {what}")]
    NotFound { what: String },
}

impl Error {
    /// The HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.http_status_code),
            Error::Decode(e) => Some(e.status),
            Error::UnhandledStatus { status } => Some(*status),
            Error::Auth(e) | Error::Reauthentication(e) => e.status(),
            _ => None,
        }
    }

    pub(crate) fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound { what: what.into() }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// TLS setup or handshake error.
    #[error("TLS error: {message}")]
    Tls { message: String },

    /// Request timed out. Carries the budget that expired, when known.
    #[error(
        "request timed out{}",
        .duration_ms.map(|ms| format!(" after {ms}ms")).unwrap_or_default()
    )]
    Timeout { duration_ms: Option<u64> },

    /// Reading a request or response body failed.
    #[error("body error: {message}")]
    Body { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout { duration_ms: None }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_body() || err.is_decode() {
            TransportError::Body {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl TransportError {
    /// Timeout error for a budget that expired.
    pub(crate) fn timed_out(limit: Duration) -> Self {
        TransportError::Timeout {
            duration_ms: Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX)),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No username/password has been supplied to the client.
    #[error("no credentials configured")]
    MissingCredentials,

    /// The gateway refused the login.
    #[error("login rejected: {0}")]
    Rejected(ApiError),

    /// The gateway answered the login with a body that could not be decoded.
    #[error("login response invalid: {0}")]
    Undecodable(DecodeError),

    /// The login succeeded but returned no token.
    #[error("login returned an empty token")]
    EmptyToken,

    /// The login request never got a response.
    #[error("login transport failure: {0}")]
    Transport(#[from] TransportError),
}

impl AuthError {
    fn status(&self) -> Option<u16> {
        match self {
            AuthError::Rejected(e) => Some(e.http_status_code),
            AuthError::Undecodable(e) => Some(e.status),
            _ => None,
        }
    }
}

/// A structured error reported by the gateway.
///
/// Wire shape: `{"message": string, "httpStatusCode": int, "errorCode": int}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// HTTP status code.
    #[serde(default)]
    pub http_status_code: u16,
    /// Gateway error code.
    #[serde(rename = "errorCode", default)]
    pub major_error_code: i64,
    /// Human readable message.
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP {} [{}]: {}",
            self.http_status_code, self.major_error_code, self.message
        )
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(http_status_code: u16, major_error_code: i64, message: impl Into<String>) -> Self {
        Self {
            http_status_code,
            major_error_code,
            message: message.into(),
        }
    }

    /// Check if the gateway reported a missing object.
    pub fn is_not_found(&self) -> bool {
        self.http_status_code == 404
    }
}

/// A response body that did not match the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not decode response body (HTTP {status}): {reason}")]
pub struct DecodeError {
    /// HTTP status of the response that carried the body.
    pub status: u16,
    /// What went wrong while decoding.
    pub reason: String,
}

impl DecodeError {
    pub(crate) fn new(status: u16, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid gateway endpoint URL.
    #[error("invalid endpoint '{value}': {reason}")]
    Endpoint { value: String, reason: String },

    /// Invalid API version string.
    #[error("invalid API version '{value}': {reason}")]
    Version { value: String, reason: String },

    /// Invalid client configuration.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_decodes_wire_shape() {
        let body = r#"{"message":"bad","httpStatusCode":500,"errorCode":7}"#;
        let err: ApiError = serde_json::from_str(body).unwrap();
        assert_eq!(err, ApiError::new(500, 7, "bad"));
        assert_eq!(err.to_string(), "HTTP 500 [7]: bad");
    }

    #[test]
    fn reauthentication_is_distinct_from_api_error() {
        let err = Error::Reauthentication(AuthError::Rejected(ApiError::new(401, 0, "nope")));
        assert!(matches!(err, Error::Reauthentication(_)));
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().starts_with("error re-authenticating"));
    }

    #[test]
    fn decode_error_keeps_status() {
        let err = Error::from(DecodeError::new(503, "EOF while parsing"));
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn timeout_reports_the_expired_budget() {
        let err = TransportError::timed_out(Duration::from_secs(30));
        assert!(matches!(
            err,
            TransportError::Timeout {
                duration_ms: Some(30_000)
            }
        ));
        assert_eq!(err.to_string(), "request timed out after 30000ms");

        let unknown = TransportError::Timeout { duration_ms: None };
        assert_eq!(unknown.to_string(), "request timed out");
    }
}
