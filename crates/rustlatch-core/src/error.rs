//! Error types for the RustLatch core.

/// Core error type for RustLatch configuration.
#[derive(Debug, thiserror::Error)]
pub enum RustLatchError {
    /// A required credential variable is not set.
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for RustLatch core operations.
pub type RustLatchResult<T> = Result<T, RustLatchError>;
