//! Protocol constants, configuration, and shared errors for RustLatch.
//!
//! This crate holds the pieces every other RustLatch crate agrees on: the
//! immutable [`protocol`] constants of the 11Paths signing scheme and the
//! environment-driven [`LatchConfig`].

mod config;
mod error;
pub mod protocol;

pub use config::LatchConfig;
pub use error::{RustLatchError, RustLatchResult};
