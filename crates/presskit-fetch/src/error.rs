use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

/// A failed page fetch. Callers treat every variant as a soft failure.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// The URL the failed request targeted, when known.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Request { url, .. }
            | Self::Timeout { url, .. }
            | Self::Status { url, .. }
            | Self::InvalidUrl { url, .. } => Some(url),
            Self::Client(_) => None,
        }
    }
}
