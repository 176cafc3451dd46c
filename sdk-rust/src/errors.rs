use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// No usable credential was found. Raised before any network I/O.
    #[error("Authentication error: {0}")]
    Auth(String),
    /// The request could not be delivered (DNS, connection refused, timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The provider answered with a non-2xx status. The body is kept verbatim.
    #[error("Status error: {body} (Status {status})")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The response from the provider was unexpected (e.g. a 2xx body that is
    /// not JSON).
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
}

impl ProviderError {
    /// Whether the user can fix this by supplying a credential and retrying.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
