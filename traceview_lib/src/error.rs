//! Error types for the TraceView API client.

use thiserror::Error;

/// Base error type for TraceView operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A resource was invoked without a resolvable path.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The requested HTTP method is not supported by the resource.
    #[error("protocol error: {0}")]
    Protocol(String),

    #[error(transparent)]
    Http(#[from] HttpError),

    /// The request never produced a response (connect failure, timeout).
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A successful response whose body is not a `{"data": ...}` envelope.
    #[error("invalid response from {url}: {message}")]
    Decode {
        url: String,
        message: String,
        body: String,
    },

    #[error("failed to encode query parameters: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    /// HTTP status of the response, if the remote service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(e) => Some(e.status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Network { source, .. } if source.is_timeout())
    }
}

/// Raised when the API returns a non-success status.
///
/// `url` is the request URL without its query string, so the API key never
/// ends up in error messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("HTTP {status} from {url}: {body}")]
pub struct HttpError {
    pub status: u16,
    pub url: String,
    pub body: String,
}

impl HttpError {
    pub fn new(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// The key was rejected (401) or lacks access to the resource (403).
    pub fn is_auth_failure(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}
