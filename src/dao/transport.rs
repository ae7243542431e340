use std::error::Error;
use thiserror::Error;

/// Result alias for calls against the scoring service.
pub type ApiResult<T> = Result<T, TransportError>;

/// Error raised by a scoring service client regardless of the underlying transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be completed (network failure, undecodable body, ...).
    #[error("scoring service unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The service answered with a non-success status code.
    #[error("scoring service returned status {status} for `{path}`")]
    Status { path: String, status: u16 },
}

impl TransportError {
    /// Construct an unavailable error from any client failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        TransportError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
