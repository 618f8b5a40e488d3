//! Client error types.
//!
//! Transport failures and protocol failures are kept apart: a rejected
//! signature shows up as [`ClientError::Status`] (usually 401), while a
//! successful HTTP exchange carrying an embedded error code becomes
//! [`ClientError::Api`].

use http::StatusCode;
use rustlatch_auth::AuthError;
use rustlatch_core::RustLatchError;
use rustlatch_model::{LatchError, ModelError};

/// Errors returned by RustLatch clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be described (bad URL, duplicate header, ...).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A caller-supplied ID cannot be used as a path segment.
    #[error("invalid path segment: {0:?}")]
    InvalidPathSegment(String),

    /// Missing or invalid configuration.
    #[error(transparent)]
    Config(#[from] RustLatchError),

    /// The proxy URL was rejected.
    #[error("invalid proxy URL {url}: {source}")]
    InvalidProxy {
        /// Proxy URL as configured.
        url: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// Connection or I/O failure.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-200 status.
    #[error("HTTP error [{status}] body: {body}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Response body, as text.
        body: String,
    },

    /// The service reported an error inside a 200 response.
    #[error(transparent)]
    Api(LatchError),

    /// The response body did not match the expected shape.
    #[error(transparent)]
    Model(ModelError),
}

impl ClientError {
    /// The Latch error code, if this is an embedded API error.
    #[must_use]
    pub fn api_code(&self) -> Option<i32> {
        match self {
            Self::Api(err) => Some(err.code),
            _ => None,
        }
    }
}

impl From<ModelError> for ClientError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Latch(latch) => Self::Api(latch),
            other => Self::Model(other),
        }
    }
}

/// Convenience result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
