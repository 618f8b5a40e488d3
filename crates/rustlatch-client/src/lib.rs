//! Async clients for the Latch Application and User APIs.
//!
//! [`LatchClient`] signs calls with an application's credentials and covers
//! pairing, status checks, locks, history and operation management.
//! [`LatchUserClient`] signs with a developer's user credentials and manages
//! the subscription and its applications. Both share a [`Transport`] which
//! owns the HTTP client, the clock and any [`RequestObserver`]s.
//!
//! ```no_run
//! use rustlatch_client::LatchClient;
//! use rustlatch_core::LatchConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let latch = LatchClient::from_config(LatchConfig::from_env()?)?;
//! latch.lock("account-id").await?;
//! # Ok(())
//! # }
//! ```

mod app;
mod clock;
mod error;
mod observer;
mod path;
#[cfg(test)]
mod test_support;
mod transport;
mod user;

pub use app::LatchClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ClientError, ClientResult};
pub use observer::RequestObserver;
pub use transport::{Transport, interpret_response};
pub use user::LatchUserClient;
