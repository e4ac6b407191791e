use thiserror::Error;

/// Everything that can go wrong talking to the classification endpoint.
///
/// The `Display` text is what the user sees as the failure message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClassifierError {
    /// Endpoint unreachable or the transport failed mid-request
    #[error("Request failed: {0}")]
    Network(String),

    /// Endpoint answered with `ok: false` or an error status
    #[error("{0}")]
    Server(String),

    /// Endpoint answered but the body was not the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ClassifierError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}
