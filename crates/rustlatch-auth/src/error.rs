//! Error types for request description and signature checks.
//!
//! Signing itself never fails. Every [`AuthError`] is raised either while a
//! [`RequestDescriptor`](crate::RequestDescriptor) is being built from caller
//! input or while a received authorization header is checked.

/// Errors that can occur while describing or verifying a signed request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The target URL could not be parsed.
    #[error("Invalid request URI {uri}: {reason}")]
    InvalidUri {
        /// The URL as supplied by the caller.
        uri: String,
        /// Parser message.
        reason: String,
    },

    /// The target URL has no scheme or host.
    #[error("Request URI must be absolute: {0}")]
    RelativeUri(String),

    /// The HTTP method is not one of GET, POST, PUT, DELETE.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A custom header name is not a valid HTTP header name.
    #[error("Invalid header name: {0}")]
    InvalidHeaderName(String),

    /// Two custom headers share a name once case is ignored.
    #[error("Duplicate header: {0}")]
    DuplicateHeader(String),

    /// The `Authorization` header could not be parsed.
    #[error("Invalid Authorization header format")]
    InvalidAuthHeader,

    /// The authorization header names a different application or user.
    #[error("Authorization header is for {found}, expected {expected}")]
    IdentityMismatch {
        /// Identifier of the local credential.
        expected: String,
        /// Identifier found in the header.
        found: String,
    },

    /// The computed signature does not match the provided signature.
    #[error("Signature does not match")]
    SignatureDoesNotMatch,
}
