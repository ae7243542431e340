//! Error types shared by the HTTP scoring service client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::dao::transport::TransportError;

/// Convenient result alias returning [`HttpApiError`] failures.
pub type HttpApiResult<T> = Result<T, HttpApiError>;

/// Failures that can occur while talking to the scoring service over HTTP.
#[derive(Debug, Error)]
pub enum HttpApiError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build scoring service client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The configured base URL cannot be parsed or cannot carry path segments.
    #[error("invalid scoring service base URL `{url}`")]
    InvalidBaseUrl { url: String },
    /// A request could not be sent.
    #[error("failed to send request to `{path}`")]
    RequestSend {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// The service returned a non-success status code.
    #[error("unexpected response status {status} for `{path}`")]
    RequestStatus { path: String, status: StatusCode },
    /// Response payload could not be parsed into the expected JSON shape.
    #[error("failed to decode response for `{path}`")]
    DecodeResponse {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

impl From<HttpApiError> for TransportError {
    fn from(err: HttpApiError) -> Self {
        match err {
            HttpApiError::RequestStatus { path, status } => TransportError::Status {
                path,
                status: status.as_u16(),
            },
            other => TransportError::unavailable(other.to_string(), other),
        }
    }
}
