use thiserror::Error;

/// Failure modes for calls against the hosted AI API.
///
/// A timeout is reported distinctly from a service rejection.
/// `InvalidInput` is raised before any network traffic happens.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured wait elapsed before the service finished responding.
    #[error("Request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Non-success status from the service, with its reported message when
    /// the body carried one.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Caller-supplied data rejected before dispatch.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Connection or transfer failure below the HTTP layer.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The service answered 2xx but the body did not have the shape we
    /// expect.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// True for the timeout variant only, regardless of how deep the
    /// timeout surfaced (connect, send or body read).
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }
}
