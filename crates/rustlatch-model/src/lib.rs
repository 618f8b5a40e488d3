//! Latch API response model for RustLatch.
//!
//! Responses are decoded through a closed set of tagged variants
//! ([`LatchResponse`]) selected by the calling operation ([`ResponseKind`]),
//! after the body has been checked for an embedded [`LatchError`].

pub mod error;
pub mod output;
pub mod response;
pub mod types;

pub use error::{ErrorEnvelope, LatchError, ModelError, check_error};
pub use output::*;
pub use response::{LatchResponse, ResponseKind};
pub use types::{LatchStatus, TwoFactorPolicy};
