//! Response status classification and structured error decoding.

use reqwest::StatusCode;
use tracing::{trace, warn};

use crate::error::{ApiError, DecodeError, Error};

/// Statuses that mean the request succeeded.
const SUCCESS: [u16; 4] = [200, 201, 202, 204];

/// Error statuses for which the gateway sends a structured error body.
const CLASSIFIED: [u16; 11] = [400, 401, 403, 404, 405, 406, 409, 415, 500, 503, 504];

/// How the executor should treat a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusClass {
    Success,
    /// 401: the session token expired or is invalid.
    Expired,
    Classified,
    Unhandled,
}

pub(crate) fn status_class(status: StatusCode) -> StatusClass {
    let code = status.as_u16();
    if SUCCESS.contains(&code) {
        StatusClass::Success
    } else if status == StatusCode::UNAUTHORIZED {
        StatusClass::Expired
    } else if CLASSIFIED.contains(&code) {
        StatusClass::Classified
    } else {
        StatusClass::Unhandled
    }
}

pub(crate) fn is_success(status: StatusCode) -> bool {
    status_class(status) == StatusClass::Success
}

/// Decode a captured error body into an [`ApiError`].
///
/// The body must carry a `message`; `httpStatusCode` falls back to `status`
/// when the gateway leaves it out, and `errorCode` to 0. This is a pure
/// function of its inputs.
///
/// # Errors
///
/// Returns a [`DecodeError`] carrying `status` when the body is not a JSON
/// error object.
pub fn classify(status: u16, body: &[u8]) -> Result<ApiError, DecodeError> {
    let mut error: ApiError = serde_json::from_slice(body).map_err(|e| {
        DecodeError::new(
            status,
            format!("error parsing error body for non-2xx request: {e}"),
        )
    })?;

    if error.http_status_code == 0 {
        error.http_status_code = status;
    }

    Ok(error)
}

/// Read an error response to the end and decode it.
pub(crate) async fn read_error(response: reqwest::Response) -> Result<ApiError, DecodeError> {
    let status = response.status().as_u16();
    let body = response
        .bytes()
        .await
        .map_err(|e| DecodeError::new(status, format!("error reading body: {e}")))?;
    trace!(status, body = %String::from_utf8_lossy(&body), "error response body");
    classify(status, &body)
}

/// Read an error response to the end and turn it into the crate error.
pub(crate) async fn classify_response(response: reqwest::Response) -> Error {
    match read_error(response).await {
        Ok(api) => Error::Api(api),
        Err(decode) => Error::Decode(decode),
    }
}

/// Report a status outside the handled sets, releasing the body first.
pub(crate) async fn unhandled(response: reqwest::Response) -> Error {
    let status = response.status();
    warn!(%status, "unhandled API response");
    drain(response).await;
    Error::UnhandledStatus {
        status: status.as_u16(),
    }
}

/// Read and discard whatever is left of a response body.
pub(crate) async fn drain(response: reqwest::Response) {
    if let Err(e) = response.bytes().await {
        trace!(error = %e, "failed to drain response body");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses() {
        for code in [200, 201, 202, 204] {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(status_class(status), StatusClass::Success, "{code}");
        }
    }

    #[test]
    fn unauthorized_means_expired() {
        assert_eq!(status_class(StatusCode::UNAUTHORIZED), StatusClass::Expired);
    }

    #[test]
    fn classified_statuses() {
        for code in [400, 403, 404, 405, 406, 409, 415, 500, 503, 504] {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(status_class(status), StatusClass::Classified, "{code}");
        }
    }

    #[test]
    fn everything_else_is_unhandled() {
        for code in [203, 206, 301, 302, 402, 418, 429, 502] {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(status_class(status), StatusClass::Unhandled, "{code}");
        }
    }

    #[test]
    fn decodes_structured_error() {
        let body = br#"{"message":"bad","httpStatusCode":500,"errorCode":7}"#;
        assert_eq!(classify(500, body).unwrap(), ApiError::new(500, 7, "bad"));
    }

    #[test]
    fn classify_is_idempotent() {
        let body = br#"{"message":"Could not find the volume","httpStatusCode":404,"errorCode":79}"#;
        assert_eq!(classify(404, body), classify(404, body));

        let garbage = b"<html>oops</html>";
        assert_eq!(classify(503, garbage), classify(503, garbage));
    }

    #[test]
    fn missing_status_falls_back_to_transport_status() {
        let body = br#"{"message":"conflict"}"#;
        let err = classify(409, body).unwrap();
        assert_eq!(err.http_status_code, 409);
        assert_eq!(err.major_error_code, 0);
    }

    #[test]
    fn non_json_body_is_a_decode_error_with_status() {
        let err = classify(503, b"Service Unavailable").unwrap_err();
        assert_eq!(err.status, 503);
        assert!(err.reason.contains("error parsing error body"));
    }

    #[test]
    fn empty_body_is_a_decode_error() {
        assert_eq!(classify(500, b"").unwrap_err().status, 500);
    }
}
