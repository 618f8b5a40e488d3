//! Latch error types.
//!
//! A successful HTTP status does not mean the call succeeded: the service can
//! embed an error object in the JSON body, e.g.
//! `{"error":{"code":205,"message":"Account and application already paired"}}`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error reported by the Latch service inside a response body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LatchError {
    /// Numeric Latch error code; zero means no error.
    #[serde(default)]
    pub code: i32,
    /// Human readable message.
    #[serde(default)]
    pub message: String,
}

impl LatchError {
    /// Create a new error.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for LatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Latch Error: [{}] {}", self.code, self.message)
    }
}

impl std::error::Error for LatchError {}

/// Envelope used to look for an embedded error before decoding a payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    /// The embedded error, if any.
    #[serde(default)]
    pub error: Option<LatchError>,
}

/// Errors raised while decoding a response body.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The body is not valid JSON for the expected shape.
    #[error("failed to decode {kind} response: {source}")]
    Decode {
        /// Name of the expected response kind.
        kind: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The body carries a non-zero Latch error code.
    #[error(transparent)]
    Latch(#[from] LatchError),

    /// A decoded response was converted to the wrong concrete shape.
    #[error("unexpected response kind: expected {expected}, got {actual}")]
    UnexpectedKind {
        /// Requested shape.
        expected: &'static str,
        /// Shape actually held.
        actual: &'static str,
    },
}

/// Return the embedded error of `body` if its code is non-zero.
///
/// # Errors
///
/// Returns [`ModelError::Decode`] if the body is not a JSON object and
/// [`ModelError::Latch`] if it carries a non-zero error code.
pub fn check_error(body: &str) -> Result<(), ModelError> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).map_err(|source| ModelError::Decode {
        kind: "error",
        source,
    })?;
    match envelope.error {
        Some(err) if err.code != 0 => Err(ModelError::Latch(err)),
        _ => Ok(()),
    }
}
