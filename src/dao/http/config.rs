use std::time::Duration;

/// Runtime configuration describing how to reach the scoring service.
#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpApiConfig {
    /// Construct a configuration from an explicit base URL and request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}
