//! Error types for the API client.

use std::fmt;

use reqwest::{header::HeaderMap, StatusCode};

/// Errors that can occur when building a client or making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The client was constructed without an API token.
    #[error("An API token is required")]
    MissingCredential,
    /// A configuration value (base URL, timeout, header value) was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The request payload could not be encoded as JSON.
    #[error("Failed to serialize request body")]
    Serialization(#[source] serde_json::Error),
    /// The request could not be constructed from the method and path.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// The request never produced a response (connection, DNS, timeout, body read).
    #[error("Request failed")]
    Transport(#[source] reqwest::Error),
    /// A success response carried a body that is not the expected JSON.
    #[error("Failed to decode response body")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// Leading part of the offending body.
        body: String,
    },
    /// The API reported a failure, either through the HTTP status or the
    /// `status` field embedded in a success response.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// HTTP status of the response behind an [`Error::Api`].
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Api(e) => Some(e.status_code),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Provider-supplied message, when the API sent one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Api(e) if !e.message.is_empty() => Some(&e.message),
            _ => None,
        }
    }

    /// True for failures raised while constructing a client.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::InvalidConfiguration(_))
    }
}

/// Structured error result: the response that failed plus the decoded
/// `{status, message}` envelope. Both strings are empty when the body was
/// not a JSON error envelope.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status_code: StatusCode,
    pub headers: HeaderMap,
    pub status: String,
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "API request failed with status {}", self.status_code)
        } else {
            write!(
                f,
                "API request failed with status {}: {}",
                self.status_code, self.message
            )
        }
    }
}

impl std::error::Error for ApiError {}
